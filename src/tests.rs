use std::path::Path;

use crate::commandline_parser::ArgumentParser;
use crate::generating::{first_sets, node_ids};
use crate::generator::ParserGenerator;
use crate::grammar::GrammarLoader;

#[test]
fn end_to_end_generation_from_the_doc_grammar() {
    let generator = ParserGenerator::new();
    let mut buffer: Vec<u8> = Vec::new();

    generator
        .run(Path::new("doc/scripting.grammar"), &mut buffer)
        .unwrap();
    let printed = String::from_utf8(buffer).unwrap();

    let mut loader = GrammarLoader::new();
    loader.load_str(include_str!("../doc/scripting.grammar"));
    assert_eq!(loader.grammar.len(), 32);

    for rule in &loader.grammar.rules {
        let name = rule.rule_name().unwrap();
        assert!(
            printed.contains(&format!("pub fn parse_{}(", name)),
            "missing entry point for {}",
            name
        );
    }
}

#[test]
fn doc_grammar_first_sets_predict_statement_starts() {
    let mut loader = GrammarLoader::new();
    loader.load_str(include_str!("../doc/scripting.grammar"));

    let ids = node_ids::assign_node_ids(&loader.grammar);
    let first = first_sets::compute_first_sets(&loader.grammar, &ids, false).unwrap();

    let file_input = loader.grammar.rule_named("file_input").unwrap();
    let set = first.of(ids.id_of(file_input).unwrap());

    assert!(set.contains("'if'"));
    assert!(set.contains("'def'"));
    assert!(set.contains("TOK_NEWLINE"));
    assert!(set.contains("TOK_ENDMARKER"));
    assert!(!set.contains(first_sets::EPS));
}

#[test]
fn argument_parser_splits_verbs_and_flags() {
    let mut args = ArgumentParser::from_args(vec![
        String::from("--debug"),
        String::from("parse_grammar"),
        String::from("doc/scripting.grammar"),
        String::from("--mystery"),
    ]);

    assert_eq!(args.verb(), Some("parse_grammar"));
    assert_eq!(args.get_parameter(0), Some("doc/scripting.grammar"));
    assert_eq!(args.get_parameter(1), None);
    assert!(args.has_flag("--debug"));
    assert!(!args.has_flag("--quiet"));
    assert_eq!(args.unused_flags(), vec!["--mystery"]);
}
