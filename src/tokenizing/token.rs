#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Endmarker,
    Name,
    Number,
    String,
    Newline,
    Indent,
    Dedent,
    Lpar,
    Rpar,
    Lsqb,
    Rsqb,
    Colon,
    Comma,
    Semi,
    Plus,
    Minus,
    Star,
    Slash,
    Vbar,
    Amper,
    Less,
    Greater,
    Equal,
    Dot,
    Percent,
    Lbrace,
    Rbrace,
    EqEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Tilde,
    Circumflex,
    LeftShift,
    RightShift,
    DoubleStar,
    PlusEqual,
    MinEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AmperEqual,
    VbarEqual,
    CircumflexEqual,
    LeftShiftEqual,
    RightShiftEqual,
    DoubleStarEqual,
    DoubleSlash,
    DoubleSlashEqual,
    At,
    AtEqual,
    RArrow,
    Ellipsis,
    Op,
    Await,
    Async,
    ErrorToken,
    NTokens,
}

impl TokenKind {
    // the spellings are referenced verbatim by grammar files, keep them stable
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Endmarker => "TOK_ENDMARKER",
            TokenKind::Name => "TOK_NAME",
            TokenKind::Number => "TOK_NUMBER",
            TokenKind::String => "TOK_STRING",
            TokenKind::Newline => "TOK_NEWLINE",
            TokenKind::Indent => "TOK_INDENT",
            TokenKind::Dedent => "TOK_DEDENT",
            TokenKind::Lpar => "TOK_LPAR",
            TokenKind::Rpar => "TOK_RPAR",
            TokenKind::Lsqb => "TOK_LSQB",
            TokenKind::Rsqb => "TOK_RSQB",
            TokenKind::Colon => "TOK_COLON",
            TokenKind::Comma => "TOK_COMMA",
            TokenKind::Semi => "TOK_SEMI",
            TokenKind::Plus => "TOK_PLUS",
            TokenKind::Minus => "TOK_MINUS",
            TokenKind::Star => "TOK_STAR",
            TokenKind::Slash => "TOK_SLASH",
            TokenKind::Vbar => "TOK_VBAR",
            TokenKind::Amper => "TOK_AMPER",
            TokenKind::Less => "TOK_LESS",
            TokenKind::Greater => "TOK_GREATER",
            TokenKind::Equal => "TOK_EQUAL",
            TokenKind::Dot => "TOK_DOT",
            TokenKind::Percent => "TOK_PERCENT",
            TokenKind::Lbrace => "TOK_LBRACE",
            TokenKind::Rbrace => "TOK_RBRACE",
            TokenKind::EqEqual => "TOK_EQEQUAL",
            TokenKind::NotEqual => "TOK_NOTEQUAL",
            TokenKind::LessEqual => "TOK_LESSEQUAL",
            TokenKind::GreaterEqual => "TOK_GREATEREQUAL",
            TokenKind::Tilde => "TOK_TILDE",
            TokenKind::Circumflex => "TOK_CIRCUMFLEX",
            TokenKind::LeftShift => "TOK_LEFTSHIFT",
            TokenKind::RightShift => "TOK_RIGHTSHIFT",
            TokenKind::DoubleStar => "TOK_DOUBLESTAR",
            TokenKind::PlusEqual => "TOK_PLUSEQUAL",
            TokenKind::MinEqual => "TOK_MINEQUAL",
            TokenKind::StarEqual => "TOK_STAREQUAL",
            TokenKind::SlashEqual => "TOK_SLASHEQUAL",
            TokenKind::PercentEqual => "TOK_PERCENTEQUAL",
            TokenKind::AmperEqual => "TOK_AMPEREQUAL",
            TokenKind::VbarEqual => "TOK_VBAREQUAL",
            TokenKind::CircumflexEqual => "TOK_CIRCUMFLEXEQUAL",
            TokenKind::LeftShiftEqual => "TOK_LEFTSHIFTEQUAL",
            TokenKind::RightShiftEqual => "TOK_RIGHTSHIFTEQUAL",
            TokenKind::DoubleStarEqual => "TOK_DOUBLESTAREQUAL",
            TokenKind::DoubleSlash => "TOK_DOUBLESLASH",
            TokenKind::DoubleSlashEqual => "TOK_DOUBLESLASHEQUAL",
            TokenKind::At => "TOK_AT",
            TokenKind::AtEqual => "TOK_ATEQUAL",
            TokenKind::RArrow => "TOK_RARROW",
            TokenKind::Ellipsis => "TOK_ELLIPSIS",
            TokenKind::Op => "TOK_OP",
            TokenKind::Await => "TOK_AWAIT",
            TokenKind::Async => "TOK_ASYNC",
            TokenKind::ErrorToken => "TOK_ERRORTOKEN",
            TokenKind::NTokens => "TOK_N_TOKENS",
        }
    }

    pub fn from_name(name: &str) -> Option<TokenKind> {
        match name {
            "TOK_ENDMARKER" => Some(TokenKind::Endmarker),
            "TOK_NAME" => Some(TokenKind::Name),
            "TOK_NUMBER" => Some(TokenKind::Number),
            "TOK_STRING" => Some(TokenKind::String),
            "TOK_NEWLINE" => Some(TokenKind::Newline),
            "TOK_INDENT" => Some(TokenKind::Indent),
            "TOK_DEDENT" => Some(TokenKind::Dedent),
            "TOK_LPAR" => Some(TokenKind::Lpar),
            "TOK_RPAR" => Some(TokenKind::Rpar),
            "TOK_LSQB" => Some(TokenKind::Lsqb),
            "TOK_RSQB" => Some(TokenKind::Rsqb),
            "TOK_COLON" => Some(TokenKind::Colon),
            "TOK_COMMA" => Some(TokenKind::Comma),
            "TOK_SEMI" => Some(TokenKind::Semi),
            "TOK_PLUS" => Some(TokenKind::Plus),
            "TOK_MINUS" => Some(TokenKind::Minus),
            "TOK_STAR" => Some(TokenKind::Star),
            "TOK_SLASH" => Some(TokenKind::Slash),
            "TOK_VBAR" => Some(TokenKind::Vbar),
            "TOK_AMPER" => Some(TokenKind::Amper),
            "TOK_LESS" => Some(TokenKind::Less),
            "TOK_GREATER" => Some(TokenKind::Greater),
            "TOK_EQUAL" => Some(TokenKind::Equal),
            "TOK_DOT" => Some(TokenKind::Dot),
            "TOK_PERCENT" => Some(TokenKind::Percent),
            "TOK_LBRACE" => Some(TokenKind::Lbrace),
            "TOK_RBRACE" => Some(TokenKind::Rbrace),
            "TOK_EQEQUAL" => Some(TokenKind::EqEqual),
            "TOK_NOTEQUAL" => Some(TokenKind::NotEqual),
            "TOK_LESSEQUAL" => Some(TokenKind::LessEqual),
            "TOK_GREATEREQUAL" => Some(TokenKind::GreaterEqual),
            "TOK_TILDE" => Some(TokenKind::Tilde),
            "TOK_CIRCUMFLEX" => Some(TokenKind::Circumflex),
            "TOK_LEFTSHIFT" => Some(TokenKind::LeftShift),
            "TOK_RIGHTSHIFT" => Some(TokenKind::RightShift),
            "TOK_DOUBLESTAR" => Some(TokenKind::DoubleStar),
            "TOK_PLUSEQUAL" => Some(TokenKind::PlusEqual),
            "TOK_MINEQUAL" => Some(TokenKind::MinEqual),
            "TOK_STAREQUAL" => Some(TokenKind::StarEqual),
            "TOK_SLASHEQUAL" => Some(TokenKind::SlashEqual),
            "TOK_PERCENTEQUAL" => Some(TokenKind::PercentEqual),
            "TOK_AMPEREQUAL" => Some(TokenKind::AmperEqual),
            "TOK_VBAREQUAL" => Some(TokenKind::VbarEqual),
            "TOK_CIRCUMFLEXEQUAL" => Some(TokenKind::CircumflexEqual),
            "TOK_LEFTSHIFTEQUAL" => Some(TokenKind::LeftShiftEqual),
            "TOK_RIGHTSHIFTEQUAL" => Some(TokenKind::RightShiftEqual),
            "TOK_DOUBLESTAREQUAL" => Some(TokenKind::DoubleStarEqual),
            "TOK_DOUBLESLASH" => Some(TokenKind::DoubleSlash),
            "TOK_DOUBLESLASHEQUAL" => Some(TokenKind::DoubleSlashEqual),
            "TOK_AT" => Some(TokenKind::At),
            "TOK_ATEQUAL" => Some(TokenKind::AtEqual),
            "TOK_RARROW" => Some(TokenKind::RArrow),
            "TOK_ELLIPSIS" => Some(TokenKind::Ellipsis),
            "TOK_OP" => Some(TokenKind::Op),
            "TOK_AWAIT" => Some(TokenKind::Await),
            "TOK_ASYNC" => Some(TokenKind::Async),
            "TOK_ERRORTOKEN" => Some(TokenKind::ErrorToken),
            "TOK_N_TOKENS" => Some(TokenKind::NTokens),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
    pub len: usize,
    pub line: usize,
    // filled for names, numbers, strings, newlines and operators;
    // empty for indent, dedent and the end marker
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, pos: usize, len: usize, line: usize) -> Token {
        Token {
            kind,
            pos,
            len,
            line,
            text: String::new(),
        }
    }

    pub fn with_text(kind: TokenKind, pos: usize, len: usize, line: usize, text: String) -> Token {
        Token {
            kind,
            pos,
            len,
            line,
            text,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.as_str())?;
        f.write_str(" ")?;
        for c in self.text.chars() {
            if c == '\n' {
                f.write_str("\\n")?;
            } else if c == '\r' {
                f.write_str("\\r")?;
            } else {
                f.write_fmt(format_args!("{c}"))?;
            }
        }
        Ok(())
    }
}
