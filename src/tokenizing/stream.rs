use super::token::Token;

// cursor over a tokenized source file, shared by all procedures of a
// generated parser. procedures snapshot the position with mark() and roll
// back with reset() when an attempt fails
pub struct TokenStream<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [Token]) -> TokenStream<'t> {
        TokenStream { tokens, pos: 0 }
    }

    pub fn mark(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub fn take_kind(&mut self, kind_name: &str) -> Option<&'t Token> {
        match self.peek() {
            Some(tok) if tok.kind.as_str() == kind_name => {
                self.pos += 1;
                Some(tok)
            }
            _ => None,
        }
    }

    pub fn take_text(&mut self, text: &str) -> Option<&'t Token> {
        match self.peek() {
            Some(tok) if tok.text == text => {
                self.pos += 1;
                Some(tok)
            }
            _ => None,
        }
    }

    // a terminal spelling comes straight out of a grammar file: either a
    // single-quoted literal or a token kind name
    pub fn next_matches(&self, terminal: &str) -> bool {
        let tok = match self.peek() {
            Some(tok) => tok,
            None => return false,
        };

        if terminal.len() >= 2 && terminal.starts_with('\'') && terminal.ends_with('\'') {
            tok.text == terminal[1..terminal.len() - 1]
        } else {
            tok.kind.as_str() == terminal
        }
    }

    pub fn next_matches_any(&self, terminals: &[&str]) -> bool {
        terminals.iter().any(|t| self.next_matches(t))
    }
}
