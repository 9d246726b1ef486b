use std::io::Write;
use std::path::Path;

use crate::generating::code_writer::CodeWriter;
use crate::generating::first_sets::{self, GenError};
use crate::generating::node_ids;
use crate::generating::parser_emitter::ParserEmitter;
use crate::grammar::GrammarLoader;

// runs the whole pipeline in order: load the grammar, assign node ids,
// compute the FIRST sets, emit the parser text
pub struct ParserGenerator {
    pub debug: bool,
}

impl ParserGenerator {
    pub fn new() -> ParserGenerator {
        ParserGenerator { debug: false }
    }

    pub fn run(&self, grammar_file: &Path, out: &mut dyn Write) -> Result<(), GenError> {
        let mut loader = GrammarLoader::new();
        loader.debug = self.debug;
        loader.load_file(grammar_file);

        let ids = node_ids::assign_node_ids(&loader.grammar);
        if self.debug {
            eprintln!("nodes count: {}", ids.len());
        }

        let first = first_sets::compute_first_sets(&loader.grammar, &ids, self.debug)?;

        let emitter = ParserEmitter::new(&loader.grammar, &ids, &first);
        let mut writer = CodeWriter::new(out);
        emitter.emit(&mut writer)?;
        Ok(())
    }
}
