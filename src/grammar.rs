pub mod ebnf_parser;
pub mod ebnf_tokenizer;
pub mod grammar_node;

#[cfg(test)]
mod tests_ebnf;

use std::path::Path;

use self::grammar_node::Grammar;

// reads a grammar file and keeps both the flat token list and the rule map
pub struct GrammarLoader {
    pub debug: bool,
    pub tokens: Vec<String>,
    pub grammar: Grammar,
}

impl GrammarLoader {
    pub fn new() -> GrammarLoader {
        GrammarLoader {
            debug: false,
            tokens: Vec::new(),
            grammar: Grammar::new(),
        }
    }

    pub fn load_file(&mut self, file_name: &Path) {
        // an unreadable file degrades to an empty grammar
        let text = std::fs::read_to_string(file_name).unwrap_or_default();
        self.load_str(&text);
    }

    pub fn load_str(&mut self, text: &str) {
        self.tokens = ebnf_tokenizer::tokenize(text);
        self.grammar = ebnf_parser::parse_rules(&self.tokens, self.debug);
    }
}
