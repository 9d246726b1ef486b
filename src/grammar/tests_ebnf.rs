use crate::grammar::ebnf_parser;
use crate::grammar::ebnf_tokenizer;
use crate::grammar::grammar_node::GrammarNode;
use crate::grammar::GrammarLoader;

fn leaf(value: &str) -> GrammarNode {
    GrammarNode::String(String::from(value))
}

fn load(definition: &str) -> GrammarLoader {
    let mut loader = GrammarLoader::new();
    loader.load_str(definition);
    loader
}

#[test]
fn tokenize_names_literals_and_punctuation() {
    let tokens = ebnf_tokenizer::tokenize("a: 'b c' [x_1]* # trailing note\nd: E+");

    assert_eq!(
        tokens,
        vec!["a", ":", "'b c'", "[", "x_1", "]", "*", "d", ":", "E", "+"]
    );
}

#[test]
fn tokenize_skips_unknown_bytes() {
    let tokens = ebnf_tokenizer::tokenize("a ; = b");

    assert_eq!(tokens, vec!["a", "b"]);
}

#[test]
fn tokenize_tolerates_unclosed_literal() {
    let tokens = ebnf_tokenizer::tokenize("a: 'oops");

    assert_eq!(tokens, vec!["a", ":", "'oops"]);
}

#[test]
fn assignment_rule() {
    let loader = load("simple_stmt: NAME '=' NAME NEWLINE");

    assert_eq!(loader.grammar.len(), 1, "{:?}", loader.grammar.rules);

    let rule = loader.grammar.rule_named("simple_stmt").unwrap();
    assert_eq!(
        rule,
        &GrammarNode::Rule(
            String::from("simple_stmt"),
            Box::new(GrammarNode::Sequence(vec![
                leaf("NAME"),
                leaf("'='"),
                leaf("NAME"),
                leaf("NEWLINE"),
            ]))
        )
    );
}

#[test]
fn three_way_alternation() {
    let loader = load("x: A | B | C");

    let rule = loader.grammar.rule_named("x").unwrap();
    assert_eq!(
        rule,
        &GrammarNode::Rule(
            String::from("x"),
            Box::new(GrammarNode::Rhs(vec![leaf("A"), leaf("B"), leaf("C")]))
        )
    );
}

#[test]
fn grouped_repetition_with_plus() {
    let loader = load("x: (A B)+");

    let rule = loader.grammar.rule_named("x").unwrap();
    assert_eq!(
        rule,
        &GrammarNode::Rule(
            String::from("x"),
            Box::new(GrammarNode::Repetition(
                Box::new(GrammarNode::Sequence(vec![leaf("A"), leaf("B")])),
                false
            ))
        )
    );
}

#[test]
fn starred_term_and_option() {
    let loader = load("x: A* [ B ]");

    let rule = loader.grammar.rule_named("x").unwrap();
    assert_eq!(
        rule,
        &GrammarNode::Rule(
            String::from("x"),
            Box::new(GrammarNode::Sequence(vec![
                GrammarNode::Repetition(Box::new(leaf("A")), true),
                GrammarNode::Optional(Box::new(leaf("B"))),
            ]))
        )
    );
}

#[test]
fn plain_group_is_erased() {
    let loader = load("x: ( A )");

    let rule = loader.grammar.rule_named("x").unwrap();
    assert_eq!(
        rule,
        &GrammarNode::Rule(String::from("x"), Box::new(leaf("A")))
    );
}

#[test]
fn rule_order_follows_the_file() {
    let loader = load("b: B\na: A\nc: C");

    let names: Vec<&str> = loader
        .grammar
        .rules
        .iter()
        .filter_map(|rule| rule.rule_name())
        .collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn redefinition_overwrites_in_place() {
    let loader = load("a: A\nb: B\na: C");

    assert_eq!(loader.grammar.len(), 2);
    assert_eq!(
        loader.grammar.rule_named("a").unwrap(),
        &GrammarNode::Rule(String::from("a"), Box::new(leaf("C")))
    );
}

#[test]
fn malformed_production_is_dropped() {
    let loader = load("a: A | | B\nb: B");

    assert_eq!(loader.grammar.len(), 1, "{:?}", loader.grammar.rules);
    assert!(loader.grammar.rule_named("b").is_some());
}

#[test]
fn no_degenerate_sequences_or_alternations() {
    let loader = load(include_str!("../../doc/scripting.grammar"));
    assert!(loader.grammar.len() > 0);

    for rule in &loader.grammar.rules {
        assert_well_formed(rule);
    }
}

fn assert_well_formed(node: &GrammarNode) {
    match node {
        GrammarNode::Sequence(children) => {
            assert!(children.len() >= 2, "degenerate sequence {:?}", node)
        }
        GrammarNode::Rhs(choices) => {
            assert!(choices.len() >= 2, "degenerate alternation {:?}", node)
        }
        _ => {}
    }

    for child in node.children() {
        assert_well_formed(child);
    }
}

#[test]
fn printed_grammar_parses_back_to_the_same_tree() {
    let first = load(include_str!("../../doc/scripting.grammar"));

    let printed: String = first
        .grammar
        .rules
        .iter()
        .map(|rule| format!("{}\n", rule))
        .collect();

    let second = load(&printed);

    assert_eq!(first.grammar.rules, second.grammar.rules, "\n{}", printed);
}

#[test]
fn printed_nested_shapes_parse_back() {
    let definition = "x: ( A B )* [ C | D ] E+ ( [ F ] )+";
    let first = load(definition);
    assert_eq!(first.grammar.len(), 1);

    let printed = format!("{}", first.grammar.rules[0]);
    let second = load(&printed);

    assert_eq!(first.grammar.rules, second.grammar.rules, "\n{}", printed);
}

#[test]
fn classification_of_terminals_and_nonterminals() {
    assert!(ebnf_parser::is_nonterminal("simple_stmt"));
    assert!(ebnf_parser::is_nonterminal("TOK_NAME"));
    assert!(!ebnf_parser::is_nonterminal("'='"));

    assert!(ebnf_parser::is_literal("'='"));
    assert!(!ebnf_parser::is_literal("TOK_NAME"));
}

#[test]
fn unreadable_file_degrades_to_an_empty_grammar() {
    let mut loader = GrammarLoader::new();
    loader.load_file(std::path::Path::new("no/such/file.grammar"));

    assert!(loader.tokens.is_empty());
    assert!(loader.grammar.is_empty());
}
