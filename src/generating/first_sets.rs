use std::collections::BTreeSet;

use crate::grammar::ebnf_parser;
use crate::grammar::grammar_node::{Grammar, GrammarNode};
use crate::tokenizing::token::TokenKind;

use super::node_ids::NodeIds;

// pseudo-terminal marking that a node can derive the empty string
pub const EPS: &str = "EPS";

#[derive(Debug)]
pub enum GenError {
    // a nullable alternative inside an ordered choice
    EpsInAlternative { choice: String },
    // the generated text could not be written out
    Io(std::io::Error),
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenError::EpsInAlternative { choice } => f.write_fmt(format_args!(
                "alternative `{choice}` can match nothing; generation aborted"
            )),
            GenError::Io(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> GenError {
        GenError::Io(err)
    }
}

// FIRST(n) for every node, with EPS marking nullability. computed as a fix
// point: all sets start empty and are recomputed from their children until
// no set grows, so mutually recursive rules terminate by construction
pub struct FirstSets {
    sets: Vec<BTreeSet<String>>,
}

impl FirstSets {
    pub fn of(&self, id: usize) -> &BTreeSet<String> {
        &self.sets[id]
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }
}

pub fn compute_first_sets(
    grammar: &Grammar,
    ids: &NodeIds,
    debug: bool,
) -> Result<FirstSets, GenError> {
    let mut sets: Vec<BTreeSet<String>> = vec![BTreeSet::new(); ids.len()];

    let mut changed = true;
    while changed {
        changed = false;
        for (id, node) in ids.iter() {
            let computed = first_of(node, grammar, ids, &sets, debug);
            if !computed.is_subset(&sets[id]) {
                sets[id].extend(computed);
                changed = true;
            }
        }
    }

    // a nullable alternative would make the ordered choice meaningless
    for (_, node) in ids.iter() {
        if let GrammarNode::Rhs(choices) = node {
            for choice in choices {
                let nullable = ids
                    .id_of(choice)
                    .map(|cid| sets[cid].contains(EPS))
                    .unwrap_or(false);
                if nullable {
                    return Err(GenError::EpsInAlternative {
                        choice: choice.to_string(),
                    });
                }
            }
        }
    }

    Ok(FirstSets { sets })
}

fn first_of(
    node: &GrammarNode,
    grammar: &Grammar,
    ids: &NodeIds,
    sets: &[BTreeSet<String>],
    debug: bool,
) -> BTreeSet<String> {
    let set_of = |child: &GrammarNode| -> BTreeSet<String> {
        ids.id_of(child)
            .map(|cid| sets[cid].clone())
            .unwrap_or_default()
    };

    match node {
        GrammarNode::String(value) => {
            if ebnf_parser::is_literal(value) {
                BTreeSet::from([value.clone()])
            } else if let Some(rule) = grammar.rule_named(value) {
                set_of(rule)
            } else if TokenKind::from_name(value).is_some() {
                BTreeSet::from([value.clone()])
            } else {
                if debug {
                    eprintln!("unknown symbol {value}");
                }
                BTreeSet::new()
            }
        }
        GrammarNode::Optional(child) => {
            let mut set = set_of(child.as_ref());
            set.insert(String::from(EPS));
            set
        }
        GrammarNode::Repetition(child, star) => {
            let mut set = set_of(child.as_ref());
            if *star {
                set.insert(String::from(EPS));
            }
            set
        }
        GrammarNode::Sequence(children) => {
            let mut set = BTreeSet::new();
            let mut found_eps = false;
            let mut idx = 0;

            while idx != children.len() {
                let child_set = set_of(&children[idx]);

                if !child_set.contains(EPS) {
                    set.extend(child_set);
                    break;
                }

                found_eps = true;
                set.extend(child_set.into_iter().filter(|v| v != EPS));
                idx += 1;
            }

            if idx == children.len() && found_eps {
                set.insert(String::from(EPS));
            }
            set
        }
        GrammarNode::Rhs(choices) => {
            let mut set = BTreeSet::new();
            for choice in choices {
                set.extend(set_of(choice));
            }
            set
        }
        GrammarNode::Rule(_, rhs) => set_of(rhs.as_ref()),
    }
}
