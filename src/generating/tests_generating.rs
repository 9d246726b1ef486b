use std::collections::BTreeSet;

use crate::generating::ast::AstNode;
use crate::generating::code_writer::CodeWriter;
use crate::generating::first_sets::{self, GenError, EPS};
use crate::generating::node_ids;
use crate::generating::parser_emitter::ParserEmitter;
use crate::grammar::grammar_node::{Grammar, GrammarNode};
use crate::grammar::GrammarLoader;
use crate::tokenizing::token::{Token, TokenKind};

fn load(definition: &str) -> Grammar {
    let mut loader = GrammarLoader::new();
    loader.load_str(definition);
    loader.grammar
}

fn first_of_rule(grammar: &Grammar, name: &str) -> BTreeSet<String> {
    let ids = node_ids::assign_node_ids(grammar);
    let first = first_sets::compute_first_sets(grammar, &ids, false).unwrap();
    let rule = grammar.rule_named(name).unwrap();
    first.of(ids.id_of(rule).unwrap()).clone()
}

fn set(terminals: &[&str]) -> BTreeSet<String> {
    terminals.iter().map(|t| String::from(*t)).collect()
}

fn emit(definition: &str) -> String {
    let grammar = load(definition);
    let ids = node_ids::assign_node_ids(&grammar);
    let first = first_sets::compute_first_sets(&grammar, &ids, false).unwrap();

    let mut buffer: Vec<u8> = Vec::new();
    let mut writer = CodeWriter::new(&mut buffer);
    ParserEmitter::new(&grammar, &ids, &first)
        .emit(&mut writer)
        .unwrap();

    String::from_utf8(buffer).unwrap()
}

#[test]
fn ids_are_dense_and_breadth_first() {
    let grammar = load("x: A b\nb: C");
    let ids = node_ids::assign_node_ids(&grammar);

    assert_eq!(ids.len(), 6);

    // rule x, its sequence, the two leaves, then rule b and its leaf
    let rule_x = grammar.rule_named("x").unwrap();
    let rule_b = grammar.rule_named("b").unwrap();
    assert_eq!(ids.id_of(rule_x), Some(0));
    assert_eq!(ids.id_of(rule_b), Some(4));

    if let GrammarNode::Rule(_, rhs) = rule_x {
        assert_eq!(ids.id_of(rhs), Some(1));
        let children = rhs.children();
        assert_eq!(ids.id_of(children[0]), Some(2));
        assert_eq!(ids.id_of(children[1]), Some(3));
    } else {
        panic!("not a rule: {:?}", rule_x);
    }

    // every id in 0..len is assigned to exactly one node
    let assigned: Vec<usize> = ids.iter().map(|(id, _)| id).collect();
    assert_eq!(assigned, (0..ids.len()).collect::<Vec<usize>>());
}

#[test]
fn ids_are_stable_across_runs() {
    let grammar = load(include_str!("../../doc/scripting.grammar"));

    let once = node_ids::assign_node_ids(&grammar);
    let again = node_ids::assign_node_ids(&grammar);

    assert_eq!(once.len(), again.len());
    for ((id_a, node_a), (id_b, node_b)) in once.iter().zip(again.iter()) {
        assert_eq!(id_a, id_b);
        assert!(std::ptr::eq(node_a, node_b));
    }
}

#[test]
fn first_of_alternation_is_the_union() {
    let grammar = load("x: 'a' | y\ny: 'b'");
    assert_eq!(first_of_rule(&grammar, "x"), set(&["'a'", "'b'"]));
}

#[test]
fn first_walks_past_nullable_sequence_heads() {
    let grammar = load("x: [ 'a' ] 'b'");
    assert_eq!(first_of_rule(&grammar, "x"), set(&["'a'", "'b'"]));
}

#[test]
fn first_of_fully_nullable_sequence_keeps_eps() {
    let grammar = load("x: [ 'a' ] [ 'b' ]");
    assert_eq!(first_of_rule(&grammar, "x"), set(&[EPS, "'a'", "'b'"]));
}

#[test]
fn star_is_nullable_and_plus_is_not() {
    let starred = load("x: 'a'*");
    assert_eq!(first_of_rule(&starred, "x"), set(&[EPS, "'a'"]));

    let plussed = load("x: 'a'+");
    assert_eq!(first_of_rule(&plussed, "x"), set(&["'a'"]));
}

#[test]
fn token_kind_names_are_terminals() {
    let grammar = load("x: TOK_NAME");
    assert_eq!(first_of_rule(&grammar, "x"), set(&["TOK_NAME"]));
}

#[test]
fn unknown_symbols_have_an_empty_first_set() {
    let grammar = load("x: MYSTERY");
    assert_eq!(first_of_rule(&grammar, "x"), set(&[]));
}

#[test]
fn cyclic_rules_reach_a_fix_point() {
    let silent = load("a: b\nb: a");
    assert_eq!(first_of_rule(&silent, "a"), set(&[]));

    let grounded = load("a: b | 'x'\nb: a");
    assert_eq!(first_of_rule(&grounded, "a"), set(&["'x'"]));
    assert_eq!(first_of_rule(&grounded, "b"), set(&["'x'"]));
}

#[test]
fn first_computation_is_idempotent() {
    let grammar = load(include_str!("../../doc/scripting.grammar"));
    let ids = node_ids::assign_node_ids(&grammar);

    let once = first_sets::compute_first_sets(&grammar, &ids, false).unwrap();
    let again = first_sets::compute_first_sets(&grammar, &ids, false).unwrap();

    assert_eq!(once.len(), again.len());
    for (id, _) in ids.iter() {
        assert_eq!(once.of(id), again.of(id));
    }
}

#[test]
fn nullable_alternative_aborts_generation() {
    let grammar = load("x: [ 'a' ] | 'b'");
    let ids = node_ids::assign_node_ids(&grammar);

    let result = first_sets::compute_first_sets(&grammar, &ids, false);
    assert!(matches!(result, Err(GenError::EpsInAlternative { .. })));
}

#[test]
fn emitted_parser_has_a_named_entry_per_rule() {
    let printed = emit("simple: TOK_NAME '=' TOK_NAME TOK_NEWLINE");

    assert!(printed.contains("pub enum RuleName {"));
    assert!(printed.contains("Simple,"));
    assert!(printed.contains("pub fn parse_simple(stream: &mut TokenStream, out: &mut Vec<AstNode>) -> bool {"));
    assert!(printed.contains("take_kind(\"TOK_NAME\")"));
    assert!(printed.contains("take_text(\"=\")"));
    assert!(printed.contains("AstNode::rule(RuleName::Simple.as_str(), acc)"));
}

#[test]
fn emitted_alternation_gates_and_backtracks() {
    let printed = emit("x: 'a' 'b' | 'a' 'c'");

    let gates = printed.matches("next_matches_any(&[\"'a'\"])").count();
    assert_eq!(gates, 2, "\n{}", printed);
    assert!(printed.contains("stream.reset(mark);"));
    assert!(printed.contains("false"));
}

#[test]
fn emitted_plus_requires_one_pass() {
    let printed = emit("x: 'a'+");

    assert!(printed.contains("if count == 0 {"));
    assert!(printed.contains("loop {"));
}

#[test]
fn emitted_optional_always_succeeds() {
    let printed = emit("x: [ 'a' ] 'b'");

    assert!(printed.contains("} else {"));
    assert!(printed.contains("stream.reset(mark);"));
}

#[test]
fn rule_references_delegate_to_the_entry_point() {
    let printed = emit("x: y\ny: 'a'");

    assert!(printed.contains("parse_y(stream, out)"));
}

#[test]
fn ast_node_accessors() {
    let tok = Token::with_text(TokenKind::Name, 0, 1, 1, String::from("a"));
    let tree = AstNode::rule(
        "stmt",
        vec![
            AstNode::rule("expr", vec![AstNode::leaf(&tok)]),
            AstNode::rule("expr", Vec::new()),
            AstNode::rule("tail", Vec::new()),
        ],
    );

    assert_eq!(tree.rule_name(), Some("stmt"));
    assert!(tree.find_node("expr").is_some());
    assert_eq!(tree.find_nodes("expr").len(), 2);
    assert!(tree.find_node("missing").is_none());
    assert!(tree.expect_node("tail").is_ok());
    assert!(tree.expect_node("missing").is_err());
}
