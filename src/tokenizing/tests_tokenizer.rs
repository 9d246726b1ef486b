use crate::tokenizing::encoding;
use crate::tokenizing::stream::TokenStream;
use crate::tokenizing::token::{Token, TokenKind};
use crate::tokenizing::tokenizer::{TokenizeError, Tokenizer};

fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new().tokenize_str(source).unwrap()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|tok| tok.kind).collect()
}

fn texts(tokens: &[Token], kind: TokenKind) -> Vec<String> {
    tokens
        .iter()
        .filter(|tok| tok.kind == kind)
        .map(|tok| tok.text.clone())
        .collect()
}

#[test]
fn simple_assignment() {
    let tokens = tokenize("a = 1 + 2\n");

    assert_eq!(
        tokens,
        vec![
            Token::with_text(TokenKind::Name, 0, 1, 1, String::from("a")),
            Token::with_text(TokenKind::Equal, 2, 1, 1, String::from("=")),
            Token::with_text(TokenKind::Number, 4, 1, 1, String::from("1")),
            Token::with_text(TokenKind::Plus, 6, 1, 1, String::from("+")),
            Token::with_text(TokenKind::Number, 8, 1, 1, String::from("2")),
            Token::with_text(TokenKind::Newline, 9, 1, 1, String::from("\n")),
            Token::new(TokenKind::Endmarker, 10, 0, 2),
        ]
    );
}

#[test]
fn indented_block() {
    let tokens = tokenize("if x:\n    y\n    z\n");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Name,
            TokenKind::Name,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Endmarker,
        ]
    );
}

#[test]
fn implicit_line_join_inside_brackets() {
    let tokens = tokenize("(1 +\n 2)");

    assert!(tokens.iter().all(|tok| tok.kind != TokenKind::Newline));
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Lpar,
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Rpar,
            TokenKind::Endmarker,
        ]
    );
}

#[test]
fn explicit_line_join() {
    let tokens = tokenize("a = \\\nb\n");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Name,
            TokenKind::Equal,
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Endmarker,
        ]
    );
    // the joined name sits on the second physical line
    assert_eq!(tokens[2].line, 2);
}

#[test]
fn indent_events_balance_out() {
    let tokens = tokenize("if a:\n  if b:\n    c\nd\n");

    let mut balance: i64 = 0;
    for tok in &tokens {
        match tok.kind {
            TokenKind::Indent => balance += 1,
            TokenKind::Dedent => balance -= 1,
            _ => {}
        }
        assert!(balance >= 0, "dedent before its indent");
    }
    assert_eq!(balance, 0);
}

#[test]
fn trailing_dedents_are_drained_at_eof() {
    let tokens = tokenize("if a:\n  if b:\n    c\n");

    let dedents = tokens
        .iter()
        .filter(|tok| tok.kind == TokenKind::Dedent)
        .count();
    assert_eq!(dedents, 2);
    assert_eq!(tokens.last().map(|tok| tok.kind), Some(TokenKind::Endmarker));
}

#[test]
fn blank_and_comment_lines_leave_indentation_alone() {
    let tokens = tokenize("if a:\n\n    # note\n    b\n");

    let indents = tokens
        .iter()
        .filter(|tok| tok.kind == TokenKind::Indent)
        .count();
    assert_eq!(indents, 1);
}

#[test]
fn comments_produce_no_tokens() {
    let tokens = tokenize("a # hi there\nb\n");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Endmarker,
        ]
    );
}

#[test]
fn numeric_literal_forms() {
    let tokens = tokenize("0x1F 0b10 0o17 3.14 1e-5 10e3 .5 42\n");

    assert_eq!(
        texts(&tokens, TokenKind::Number),
        vec!["0x1F", "0b10", "0o17", "3.14", "1e-5", "10e3", ".5", "42"]
    );
}

#[test]
fn base_prefix_without_digits_is_fatal() {
    let result = Tokenizer::new().tokenize_str("a = 0x\n");
    assert!(matches!(result, Err(TokenizeError::MissingDigits { .. })));
}

#[test]
fn exponent_without_digits_is_fatal() {
    let result = Tokenizer::new().tokenize_str("a = 1e\n");
    assert!(matches!(result, Err(TokenizeError::MissingExponent { .. })));
}

#[test]
fn string_literal_forms() {
    let tokens = tokenize(r#"'plain' "double" rb'x' BR'y' u'z' b'w' r'v'"#);

    assert_eq!(
        texts(&tokens, TokenKind::String),
        vec!["'plain'", "\"double\"", "rb'x'", "BR'y'", "u'z'", "b'w'", "r'v'"]
    );
}

#[test]
fn escaped_quote_does_not_terminate() {
    let tokens = tokenize(r"s = 'ab\'c'");

    assert_eq!(texts(&tokens, TokenKind::String), vec![r"'ab\'c'"]);
}

#[test]
fn triple_quoted_string_spans_lines() {
    let tokens = tokenize("s = '''one\ntwo'''\n");

    assert_eq!(texts(&tokens, TokenKind::String), vec!["'''one\ntwo'''"]);
}

#[test]
fn prefix_without_quote_is_a_name() {
    let tokens = tokenize("r2d2\n");

    assert_eq!(texts(&tokens, TokenKind::Name), vec!["r2d2"]);
}

#[test]
fn unterminated_string_is_fatal() {
    let result = Tokenizer::new().tokenize_str("s = 'abc");
    assert!(matches!(
        result,
        Err(TokenizeError::UnterminatedString { .. })
    ));
}

#[test]
fn raw_newline_in_single_line_string_is_fatal() {
    let result = Tokenizer::new().tokenize_str("s = 'ab\ncd'\n");
    assert!(matches!(result, Err(TokenizeError::NewlineInString { .. })));
}

#[test]
fn closing_bracket_without_opening_is_fatal() {
    let result = Tokenizer::new().tokenize_str("a)\n");
    assert!(matches!(
        result,
        Err(TokenizeError::NegativeNesting { .. })
    ));
}

#[test]
fn unknown_byte_is_fatal() {
    let result = Tokenizer::new().tokenize_str("a = $\n");
    assert!(matches!(
        result,
        Err(TokenizeError::UnrecognizedByte { byte: b'$', .. })
    ));
}

#[test]
fn names_keep_decimal_digits_and_underscores() {
    let tokens = tokenize("x9y_2\n");

    assert_eq!(texts(&tokens, TokenKind::Name), vec!["x9y_2"]);
}

#[test]
fn multi_character_operators() {
    let tokens = tokenize("a <<= b ** c // d -> e <> f @= g ... h != i **= j //= k\n");

    let operators: Vec<TokenKind> = tokens
        .iter()
        .filter(|tok| tok.kind != TokenKind::Name)
        .map(|tok| tok.kind)
        .collect();
    assert_eq!(
        operators,
        vec![
            TokenKind::LeftShiftEqual,
            TokenKind::DoubleStar,
            TokenKind::DoubleSlash,
            TokenKind::RArrow,
            TokenKind::NotEqual,
            TokenKind::AtEqual,
            TokenKind::Ellipsis,
            TokenKind::NotEqual,
            TokenKind::DoubleStarEqual,
            TokenKind::DoubleSlashEqual,
            TokenKind::Newline,
            TokenKind::Endmarker,
        ]
    );
}

#[test]
fn bracket_nesting_returns_to_zero() {
    let tokens = tokenize("( [ { } ] )\n");

    let mut nest: i64 = 0;
    for tok in &tokens {
        match tok.kind {
            TokenKind::Lpar | TokenKind::Lsqb | TokenKind::Lbrace => nest += 1,
            TokenKind::Rpar | TokenKind::Rsqb | TokenKind::Rbrace => nest -= 1,
            _ => {}
        }
    }
    assert_eq!(nest, 0);
}

#[test]
fn token_display_is_kind_then_text() {
    let tokens = tokenize("a\n");

    assert_eq!(format!("{}", tokens[0]), "TOK_NAME a");
    assert_eq!(format!("{}", tokens[1]), "TOK_NEWLINE \\n");
    assert_eq!(format!("{}", tokens[2]), "TOK_ENDMARKER ");
}

#[test]
fn kind_names_round_trip() {
    let spellings = ["TOK_ENDMARKER", "TOK_NAME", "TOK_DOUBLESLASHEQUAL", "TOK_N_TOKENS"];
    for spelling in spellings {
        let kind = TokenKind::from_name(spelling).unwrap();
        assert_eq!(kind.as_str(), spelling);
    }
    assert_eq!(TokenKind::from_name("TOK_NOPE"), None);
}

#[test]
fn stream_backtracking() {
    let tokens = tokenize("a = 1\n");
    let mut stream = TokenStream::new(&tokens);

    assert!(stream.next_matches("TOK_NAME"));
    assert!(stream.next_matches("'a'"));
    assert!(stream.next_matches_any(&["'='", "TOK_NAME"]));

    let mark = stream.mark();
    assert!(stream.take_kind("TOK_NAME").is_some());
    assert!(stream.take_text("=").is_some());
    assert!(stream.take_text("=").is_none());

    stream.reset(mark);
    assert!(stream.take_text("a").is_some());
}

#[test]
fn encoding_from_coding_comment() {
    assert_eq!(
        encoding::detect_encoding(b"# -*- coding: utf-8 -*-\nprint\n"),
        "utf-8"
    );
    assert_eq!(
        encoding::detect_encoding(b"#!/usr/bin/env run\n# coding=Latin-1\n"),
        "latin-1"
    );
}

#[test]
fn encoding_defaults_and_boms() {
    assert_eq!(encoding::detect_encoding(b"print\n"), "utf-8");
    assert_eq!(encoding::detect_encoding(b""), "utf-8");
    assert_eq!(encoding::detect_encoding(&[0xEF, 0xBB, 0xBF, b'a']), "utf-8");
    assert_eq!(encoding::detect_encoding(&[0xFE, 0xFF, 0, b'a']), "utf-16be");
    assert_eq!(encoding::detect_encoding(&[0xFF, 0xFE, b'a', 0]), "utf-16le");
}

#[test]
fn encoding_comment_past_line_two_is_ignored() {
    assert_eq!(
        encoding::detect_encoding(b"a = 1\nb = 2\n# coding: ascii\n"),
        "utf-8"
    );
}

#[test]
fn unreadable_file_degrades_to_an_empty_stream() {
    let tokens = Tokenizer::new()
        .tokenize_file(std::path::Path::new("no/such/file.src"))
        .unwrap();

    assert_eq!(tokens, vec![Token::new(TokenKind::Endmarker, 0, 0, 1)]);
}
