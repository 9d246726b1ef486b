use super::ebnf_tokenizer;
use super::grammar_node::{Grammar, GrammarNode};

// a bare name: a rule reference or a terminal category
pub fn is_nonterminal(token: &str) -> bool {
    token
        .bytes()
        .next()
        .map(ebnf_tokenizer::is_name_char)
        .unwrap_or(false)
}

// a quoted literal terminal
pub fn is_literal(token: &str) -> bool {
    token.as_bytes().first() == Some(&b'\'')
}

// cursor over one production's span of the flat token list. every parse
// function records the position on entry and restores it before failing
pub struct TokenCursor<'t> {
    tokens: &'t [String],
    pos: usize,
    end: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [String], begin: usize, end: usize) -> TokenCursor<'t> {
        TokenCursor {
            tokens,
            pos: begin,
            end,
        }
    }

    pub fn peek(&self) -> Option<&'t str> {
        if self.pos >= self.end {
            None
        } else {
            self.tokens.get(self.pos).map(|t| t.as_str())
        }
    }

    pub fn get(&mut self) -> Option<&'t str> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, p: usize) {
        self.pos = p;
    }
}

// rule boundaries are found by a linear scan: a rule starts at the NAME
// before each ':' and runs to the NAME before the next ':' (or to the end of
// the token list for the last rule)
pub fn parse_rules(tokens: &[String], debug: bool) -> Grammar {
    let mut grammar = Grammar::new();
    let mut start: Option<usize> = None;

    for i in 0..tokens.len() {
        if tokens[i] == ":" {
            if let Some(p) = start {
                parse_production(tokens, p, i - 1, &mut grammar, debug);
            }
            start = if i > 0 { Some(i - 1) } else { None };
        }
    }

    if let Some(p) = start {
        parse_production(tokens, p, tokens.len(), &mut grammar, debug);
    }

    grammar
}

fn parse_production(tokens: &[String], begin: usize, end: usize, grammar: &mut Grammar, debug: bool) {
    let mut it = TokenCursor::new(tokens, begin, end);

    match parse_rule(&mut it) {
        Some(rule) => {
            if debug {
                eprintln!("{}", rule);
            }
            grammar.insert(rule);
        }
        None => {
            // a malformed production is dropped; the others are unaffected
            if debug {
                eprintln!("dropped malformed production between tokens {begin} and {end}");
            }
        }
    }
}

// rule = NAME ':' rhs
fn parse_rule(it: &mut TokenCursor) -> Option<GrammarNode> {
    let p = it.pos();

    let left = match it.peek() {
        Some(token) if is_nonterminal(token) => String::from(token),
        _ => {
            it.reset(p);
            return None;
        }
    };
    it.get();

    if it.peek() != Some(":") {
        it.reset(p);
        return None;
    }
    it.get();

    match parse_rhs(it) {
        Some(rhs) => Some(GrammarNode::Rule(left, Box::new(rhs))),
        None => {
            it.reset(p);
            None
        }
    }
}

// rhs = sequence ( '|' sequence ) *
fn parse_rhs(it: &mut TokenCursor) -> Option<GrammarNode> {
    let p = it.pos();

    let first = match parse_sequence(it) {
        Some(node) => node,
        None => {
            it.reset(p);
            return None;
        }
    };

    let mut choices = vec![first];

    while it.peek() == Some("|") {
        it.get();
        match parse_sequence(it) {
            Some(next) => choices.push(next),
            None => {
                // broken text such as `A | | B` fails the whole alternation
                it.reset(p);
                return None;
            }
        }
    }

    if choices.len() > 1 {
        Some(GrammarNode::Rhs(choices))
    } else {
        choices.pop()
    }
}

// sequence = ( term | option | repetition ) +
fn parse_sequence(it: &mut TokenCursor) -> Option<GrammarNode> {
    let mut children = Vec::new();

    loop {
        if let Some(next) = parse_term(it) {
            children.push(next);
            continue;
        }
        if let Some(next) = parse_option(it) {
            children.push(next);
            continue;
        }
        if let Some(next) = parse_repetition(it) {
            children.push(next);
            continue;
        }
        break;
    }

    if children.len() > 1 {
        Some(GrammarNode::Sequence(children))
    } else {
        children.pop()
    }
}

// term = ( NAME | STRING ) [ '+' | '*' ]
fn parse_term(it: &mut TokenCursor) -> Option<GrammarNode> {
    let p = it.pos();

    let next = match it.peek() {
        Some(token) => token,
        None => {
            it.reset(p);
            return None;
        }
    };

    if is_nonterminal(next) || is_literal(next) {
        it.get();
        let node = GrammarNode::String(String::from(next));

        if let Some(suffix) = it.peek() {
            if suffix == "*" || suffix == "+" {
                it.get();
                return Some(GrammarNode::Repetition(Box::new(node), suffix == "*"));
            }
        }

        return Some(node);
    }

    it.reset(p);
    None
}

// option = '[' rhs ']'
fn parse_option(it: &mut TokenCursor) -> Option<GrammarNode> {
    let p = it.pos();

    if it.peek() != Some("[") {
        it.reset(p);
        return None;
    }
    it.get();

    let rhs = match parse_rhs(it) {
        Some(node) => node,
        None => {
            it.reset(p);
            return None;
        }
    };

    if it.peek() != Some("]") {
        it.reset(p);
        return None;
    }
    it.get();

    Some(GrammarNode::Optional(Box::new(rhs)))
}

// repetition = '(' rhs ')' [ '+' | '*' ]
fn parse_repetition(it: &mut TokenCursor) -> Option<GrammarNode> {
    let p = it.pos();

    if it.peek() != Some("(") {
        it.reset(p);
        return None;
    }
    it.get();

    let rhs = match parse_rhs(it) {
        Some(node) => node,
        None => {
            it.reset(p);
            return None;
        }
    };

    if it.peek() != Some(")") {
        it.reset(p);
        return None;
    }
    it.get();

    if let Some(suffix) = it.peek() {
        if suffix == "+" || suffix == "*" {
            it.get();
            return Some(GrammarNode::Repetition(Box::new(rhs), suffix == "*"));
        }
    }

    // a plain group: the parentheses are erased
    Some(rhs)
}
