use std::collections::{HashMap, VecDeque};

use crate::grammar::grammar_node::{Grammar, GrammarNode};

// every node reachable from the rule roots gets one dense id, assigned once
// per run. rules are walked in rule-map order, each subtree breadth-first
pub struct NodeIds<'g> {
    order: Vec<&'g GrammarNode>,
    codes: HashMap<*const GrammarNode, usize>,
}

pub fn assign_node_ids(grammar: &Grammar) -> NodeIds {
    let mut order: Vec<&GrammarNode> = Vec::new();
    let mut codes = HashMap::new();

    for rule in &grammar.rules {
        let mut queue: VecDeque<&GrammarNode> = VecDeque::new();
        queue.push_back(rule);

        while let Some(node) = queue.pop_front() {
            codes.insert(node as *const GrammarNode, order.len());
            order.push(node);

            for child in node.children() {
                queue.push_back(child);
            }
        }
    }

    NodeIds { order, codes }
}

impl<'g> NodeIds<'g> {
    pub fn id_of(&self, node: &GrammarNode) -> Option<usize> {
        self.codes.get(&(node as *const GrammarNode)).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'g GrammarNode)> + '_ {
        self.order.iter().enumerate().map(|(id, node)| (id, *node))
    }
}
