use simple_error::SimpleError;

use crate::tokenizing::token::Token;

// the tree a generated parser produces: one rule node per matched grammar
// rule, one leaf per consumed terminal
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Rule {
        name: String,
        children: Vec<AstNode>,
    },
    Leaf(Token),
}

impl AstNode {
    pub fn rule(name: &str, children: Vec<AstNode>) -> AstNode {
        AstNode::Rule {
            name: String::from(name),
            children,
        }
    }

    pub fn leaf(token: &Token) -> AstNode {
        AstNode::Leaf(token.clone())
    }

    pub fn rule_name(&self) -> Option<&str> {
        match self {
            AstNode::Rule { name, .. } => Some(name),
            AstNode::Leaf(_) => None,
        }
    }

    pub fn expect_node(&self, expected: &str) -> Result<&AstNode, SimpleError> {
        self.find_node(expected)
            .ok_or_else(|| SimpleError::new(format!("Expected node {expected}")))
    }

    pub fn find_node(&self, expected: &str) -> Option<&AstNode> {
        match self {
            AstNode::Rule { children, .. } => children
                .iter()
                .find(|child| child.rule_name() == Some(expected)),
            AstNode::Leaf(_) => None,
        }
    }

    pub fn find_nodes(&self, expected: &str) -> Vec<&AstNode> {
        match self {
            AstNode::Rule { children, .. } => children
                .iter()
                .filter(|child| child.rule_name() == Some(expected))
                .collect(),
            AstNode::Leaf(_) => Vec::new(),
        }
    }
}
