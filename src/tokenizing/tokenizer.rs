use std::cmp;
use std::path::Path;

use simple_error::SimpleError;

use super::encoding;
use super::token::{Token, TokenKind};

#[derive(Debug)]
pub enum TokenizeError {
    // a quote was opened but the closing quote never came
    UnterminatedString { offset: usize },
    // a raw newline inside a single-line string literal
    NewlineInString { offset: usize },
    // a 0x/0b/0o prefix with no digits behind it
    MissingDigits { offset: usize },
    // an 'e' exponent marker with no digits behind it
    MissingExponent { offset: usize },
    // more closing than opening brackets
    NegativeNesting { offset: usize },
    // a byte no rule accounts for
    UnrecognizedByte { offset: usize, byte: u8 },
    // some unspecified tokenizer problem
    #[allow(dead_code)]
    Error(SimpleError),
}

impl TokenizeError {
    pub fn offset(&self) -> usize {
        match self {
            TokenizeError::UnterminatedString { offset }
            | TokenizeError::NewlineInString { offset }
            | TokenizeError::MissingDigits { offset }
            | TokenizeError::MissingExponent { offset }
            | TokenizeError::NegativeNesting { offset }
            | TokenizeError::UnrecognizedByte { offset, .. } => *offset,
            TokenizeError::Error(_) => 0,
        }
    }

    pub fn error_string(&self, source: &str) -> String {
        let offset = cmp::min(self.offset(), source.len());
        let line_number = source[..offset].bytes().filter(|&c| c == b'\n').count() + 1;
        let lower_newline = source[..offset]
            .rfind(|c| c == '\n' || c == '\r')
            .map(|v| v + 1)
            .unwrap_or(0);
        let upper_newline = source[offset..]
            .find(|c| c == '\n' || c == '\r')
            .map(|v| v + offset)
            .unwrap_or(source.len());
        let lb = cmp::max(offset as i64 - 40, lower_newline as i64) as usize;
        let ub = cmp::min(offset as i64 + 40, upper_newline as i64) as usize;
        format!(
            "{:?} on line {line_number}:\n\n{:>40}{:<40}\n{:>40}^ when tokenizing here",
            self,
            &source[lb..offset],
            &source[offset..ub],
            ""
        )
    }
}

fn is_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_newline(c: u8) -> bool {
    c == b'\r' || c == b'\n'
}

fn is_digit_dec(c: u8) -> bool {
    c.is_ascii_digit()
}

fn is_digit_bin(c: u8) -> bool {
    c == b'0' || c == b'1'
}

fn is_digit_oct(c: u8) -> bool {
    (b'0'..=b'7').contains(&c)
}

fn is_digit_hex(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

fn is_ascii_letter(c: u8) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_uppercase()
}

fn text_of(src: &[u8], from: usize, to: usize) -> String {
    String::from_utf8_lossy(&src[from..to]).into_owned()
}

pub struct Tokenizer {
    pub debug: bool,
}

impl Tokenizer {
    pub fn new() -> Tokenizer {
        Tokenizer { debug: false }
    }

    pub fn tokenize_file(&self, file_name: &Path) -> Result<Vec<Token>, TokenizeError> {
        let file_encoding = encoding::detect_file_encoding(file_name);

        if self.debug {
            eprintln!("file={} encoding={}", file_name.display(), file_encoding);
        }

        // the encoding is advisory only, the bytes are tokenized as-is.
        // an unreadable file degrades to an empty token stream
        let bytes = std::fs::read(file_name).unwrap_or_default();
        self.tokenize_bytes(&bytes)
    }

    pub fn tokenize_str(&self, source: &str) -> Result<Vec<Token>, TokenizeError> {
        self.tokenize_bytes(source.as_bytes())
    }

    pub fn tokenize_bytes(&self, src: &[u8]) -> Result<Vec<Token>, TokenizeError> {
        let mut toks: Vec<Token> = Vec::new();
        let mut p = 0;
        let mut line_num = 1;
        let mut nest: i32 = 0;
        let mut line_new = true;
        let mut indent_stack: Vec<usize> = vec![0];

        if src.starts_with(&[0xEF, 0xBB, 0xBF]) {
            p = 3;
        }

        while p < src.len() {
            let c = src[p];

            if is_whitespace(c) {
                let i = p;
                while p < src.len() && is_whitespace(src[p]) {
                    p += 1;
                }
                if line_new {
                    line_new = false;
                    // blank lines and comment-only lines leave the indent stack alone,
                    // as does any whitespace inside open brackets
                    if p < src.len() && src[p] != b'#' && !is_newline(src[p]) && nest == 0 {
                        let width = p - i;
                        let top = *indent_stack.last().unwrap_or(&0);

                        if width > top {
                            toks.push(Token::new(TokenKind::Indent, i, width, line_num));
                            indent_stack.push(width);
                        } else {
                            while width < *indent_stack.last().unwrap_or(&0) {
                                toks.push(Token::new(TokenKind::Dedent, i, 0, line_num));
                                indent_stack.pop();
                            }
                        }
                    }
                }
            } else if is_newline(c) {
                let after_content = toks
                    .last()
                    .map(|t| t.kind != TokenKind::Newline)
                    .unwrap_or(false);
                if after_content && nest == 0 && !line_new {
                    toks.push(Token::with_text(
                        TokenKind::Newline,
                        p,
                        1,
                        line_num,
                        String::from("\n"),
                    ));
                }
                p += 1;
                line_num += 1;
                if nest == 0 {
                    line_new = true;
                }
            } else if line_new {
                line_new = false;
                // content at column zero closes every block still open
                while *indent_stack.last().unwrap_or(&0) > 0 {
                    toks.push(Token::new(TokenKind::Dedent, p, 0, line_num));
                    indent_stack.pop();
                }
            } else if c == b'#' {
                while p < src.len() && !is_newline(src[p]) {
                    p += 1;
                }
            } else if c == b'\\' && p + 1 < src.len() && is_newline(src[p + 1]) {
                // explicit line join: the logical line continues, no token emitted
                p += 2;
                line_num += 1;
            } else if is_digit_dec(c) || (c == b'.' && p + 1 < src.len() && is_digit_dec(src[p + 1]))
            {
                p = self.read_number(src, p, line_num, &mut toks)?;
            } else {
                if let Some((kind, tlen)) = next_operator(src, p) {
                    toks.push(Token::with_text(
                        kind,
                        p,
                        tlen,
                        line_num,
                        text_of(src, p, p + tlen),
                    ));
                    p += tlen;

                    match kind {
                        TokenKind::Lpar | TokenKind::Lsqb | TokenKind::Lbrace => nest += 1,
                        TokenKind::Rpar | TokenKind::Rsqb | TokenKind::Rbrace => {
                            nest -= 1;
                            if nest < 0 {
                                return Err(TokenizeError::NegativeNesting { offset: p });
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                if let Some(tlen) = next_string(src, p)? {
                    toks.push(Token::with_text(
                        TokenKind::String,
                        p,
                        tlen,
                        line_num,
                        text_of(src, p, p + tlen),
                    ));
                    p += tlen;
                    continue;
                }

                if is_ascii_letter(c) {
                    let k = p;
                    while p < src.len()
                        && (is_ascii_letter(src[p]) || is_digit_dec(src[p]) || src[p] == b'_')
                    {
                        p += 1;
                    }
                    toks.push(Token::with_text(
                        TokenKind::Name,
                        k,
                        p - k,
                        line_num,
                        text_of(src, k, p),
                    ));
                    continue;
                }

                return Err(TokenizeError::UnrecognizedByte { offset: p, byte: c });
            }
        }

        // close any block still open before the end marker
        while *indent_stack.last().unwrap_or(&0) > 0 {
            toks.push(Token::new(TokenKind::Dedent, p, 0, line_num));
            indent_stack.pop();
        }

        toks.push(Token::new(TokenKind::Endmarker, p, 0, line_num));
        Ok(toks)
    }

    fn read_number(
        &self,
        src: &[u8],
        start: usize,
        line_num: usize,
        toks: &mut Vec<Token>,
    ) -> Result<usize, TokenizeError> {
        let mut p = start;
        let c1 = src[p];
        let c2 = if p + 1 < src.len() { src[p + 1] } else { b' ' };

        let base_digits: Option<fn(u8) -> bool> = if c1 == b'0' && (c2 == b'x' || c2 == b'X') {
            Some(is_digit_hex)
        } else if c1 == b'0' && (c2 == b'b' || c2 == b'B') {
            Some(is_digit_bin)
        } else if c1 == b'0' && (c2 == b'o' || c2 == b'O') {
            Some(is_digit_oct)
        } else {
            None
        };

        if let Some(is_digit) = base_digits {
            p += 2;
            while p < src.len() && is_digit(src[p]) {
                p += 1;
            }
            // the prefix alone is not a number
            if p - start < 3 {
                return Err(TokenizeError::MissingDigits { offset: p });
            }
        } else {
            while p < src.len() && is_digit_dec(src[p]) {
                p += 1;
            }

            if p < src.len() && src[p] == b'.' {
                p += 1;
                while p < src.len() && is_digit_dec(src[p]) {
                    p += 1;
                }
            }

            if p < src.len() && (src[p] == b'e' || src[p] == b'E') {
                p += 1;
                if p < src.len() && src[p] == b'-' {
                    p += 1;
                }
                let k = p;
                while p < src.len() && is_digit_dec(src[p]) {
                    p += 1;
                }
                if p == k {
                    return Err(TokenizeError::MissingExponent { offset: p });
                }
            }
        }

        toks.push(Token::with_text(
            TokenKind::Number,
            start,
            p - start,
            line_num,
            text_of(src, start, p),
        ));
        Ok(p)
    }
}

// longest match against the fixed operator table
pub fn next_operator(src: &[u8], p: usize) -> Option<(TokenKind, usize)> {
    let c1 = src[p];
    let c2 = if p + 1 < src.len() { src[p + 1] } else { b' ' };
    let c3 = if p + 2 < src.len() { src[p + 2] } else { b' ' };

    let (kind, len) = match c1 {
        b'(' => (TokenKind::Lpar, 1),
        b')' => (TokenKind::Rpar, 1),
        b'[' => (TokenKind::Lsqb, 1),
        b']' => (TokenKind::Rsqb, 1),
        b':' => (TokenKind::Colon, 1),
        b',' => (TokenKind::Comma, 1),
        b';' => (TokenKind::Semi, 1),
        b'{' => (TokenKind::Lbrace, 1),
        b'}' => (TokenKind::Rbrace, 1),
        b'~' => (TokenKind::Tilde, 1),
        b'.' => match (c2, c3) {
            (b'.', b'.') => (TokenKind::Ellipsis, 3),
            _ => (TokenKind::Dot, 1),
        },
        b'@' => match c2 {
            b'=' => (TokenKind::AtEqual, 2),
            _ => (TokenKind::At, 1),
        },
        b'<' => match (c2, c3) {
            (b'>', _) => (TokenKind::NotEqual, 2),
            (b'=', _) => (TokenKind::LessEqual, 2),
            (b'<', b'=') => (TokenKind::LeftShiftEqual, 3),
            (b'<', _) => (TokenKind::LeftShift, 2),
            _ => (TokenKind::Less, 1),
        },
        b'>' => match (c2, c3) {
            (b'=', _) => (TokenKind::GreaterEqual, 2),
            (b'>', b'=') => (TokenKind::RightShiftEqual, 3),
            (b'>', _) => (TokenKind::RightShift, 2),
            _ => (TokenKind::Greater, 1),
        },
        b'=' => match c2 {
            b'=' => (TokenKind::EqEqual, 2),
            _ => (TokenKind::Equal, 1),
        },
        b'!' => match c2 {
            b'=' => (TokenKind::NotEqual, 2),
            _ => return None,
        },
        b'+' => match c2 {
            b'=' => (TokenKind::PlusEqual, 2),
            _ => (TokenKind::Plus, 1),
        },
        b'-' => match c2 {
            b'=' => (TokenKind::MinEqual, 2),
            b'>' => (TokenKind::RArrow, 2),
            _ => (TokenKind::Minus, 1),
        },
        b'*' => match (c2, c3) {
            (b'*', b'=') => (TokenKind::DoubleStarEqual, 3),
            (b'*', _) => (TokenKind::DoubleStar, 2),
            (b'=', _) => (TokenKind::StarEqual, 2),
            _ => (TokenKind::Star, 1),
        },
        b'/' => match (c2, c3) {
            (b'/', b'=') => (TokenKind::DoubleSlashEqual, 3),
            (b'/', _) => (TokenKind::DoubleSlash, 2),
            (b'=', _) => (TokenKind::SlashEqual, 2),
            _ => (TokenKind::Slash, 1),
        },
        b'|' => match c2 {
            b'=' => (TokenKind::VbarEqual, 2),
            _ => (TokenKind::Vbar, 1),
        },
        b'%' => match c2 {
            b'=' => (TokenKind::PercentEqual, 2),
            _ => (TokenKind::Percent, 1),
        },
        b'&' => match c2 {
            b'=' => (TokenKind::AmperEqual, 2),
            _ => (TokenKind::Amper, 1),
        },
        b'^' => match c2 {
            b'=' => (TokenKind::CircumflexEqual, 2),
            _ => (TokenKind::Circumflex, 1),
        },
        _ => return None,
    };

    Some((kind, len))
}

// string literal at p: optional u/r/b/rb/br prefix, then one quote or three.
// returns the total byte length including prefix and quotes
fn next_string(src: &[u8], p: usize) -> Result<Option<usize>, TokenizeError> {
    let c1 = src[p].to_ascii_lowercase();
    let c2 = if p + 1 < src.len() {
        src[p + 1].to_ascii_lowercase()
    } else {
        b' '
    };

    let mut prefix = 0;
    if c1 == b'u' {
        prefix = 1;
    } else if c1 == b'r' {
        prefix = 1;
        if c2 == b'b' {
            prefix = 2;
        }
    } else if c1 == b'b' {
        prefix = 1;
        if c2 == b'r' {
            prefix = 2;
        }
    }

    let quote = if p + prefix < src.len() {
        src[p + prefix]
    } else {
        b' '
    };
    if quote != b'"' && quote != b'\'' {
        return Ok(None);
    }

    let long_quote =
        p + prefix + 2 < src.len() && src[p + prefix + 1] == quote && src[p + prefix + 2] == quote;

    if long_quote {
        let mut k = p + prefix + 3;
        loop {
            if k >= src.len() {
                return Err(TokenizeError::UnterminatedString { offset: k });
            }
            if src[k] == b'\\' && k + 1 < src.len() && (src[k + 1] == b'"' || src[k + 1] == b'\'') {
                k += 2;
            } else if k + 2 < src.len()
                && src[k] == quote
                && src[k + 1] == quote
                && src[k + 2] == quote
            {
                return Ok(Some(k + 3 - p));
            } else {
                k += 1;
            }
        }
    } else {
        let mut k = p + prefix + 1;
        loop {
            if k >= src.len() {
                return Err(TokenizeError::UnterminatedString { offset: k });
            }
            if src[k] == b'\\' && k + 1 < src.len() && (src[k + 1] == b'"' || src[k + 1] == b'\'') {
                k += 2;
            } else if is_newline(src[k]) {
                return Err(TokenizeError::NewlineInString { offset: k });
            } else if src[k] == quote {
                return Ok(Some(k + 1 - p));
            } else {
                k += 1;
            }
        }
    }
}
