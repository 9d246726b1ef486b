// the in-memory shape of one grammar expression. parents own their children
// exclusively; references to other rules go by name, never by pointer
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarNode {
    // a bare name (rule reference or terminal category) or a quoted literal
    String(String),
    // [ x ], matches zero or one
    Optional(Box<GrammarNode>),
    // x* when the flag is set, x+ otherwise
    Repetition(Box<GrammarNode>, bool),
    // ordered concatenation, two or more children after normalization
    Sequence(Vec<GrammarNode>),
    // ordered alternatives, two or more choices after normalization
    Rhs(Vec<GrammarNode>),
    // a named production
    Rule(String, Box<GrammarNode>),
}

impl GrammarNode {
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            GrammarNode::Rule(name, _) => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> Vec<&GrammarNode> {
        match self {
            GrammarNode::String(_) => Vec::new(),
            GrammarNode::Optional(child) => vec![child.as_ref()],
            GrammarNode::Repetition(child, _) => vec![child.as_ref()],
            GrammarNode::Sequence(children) => children.iter().collect(),
            GrammarNode::Rhs(choices) => choices.iter().collect(),
            GrammarNode::Rule(_, rhs) => vec![rhs.as_ref()],
        }
    }
}

// writes the node back out in the grammar dialect itself, so that printing a
// parsed grammar and parsing it again gives a structurally equal tree
impl std::fmt::Display for GrammarNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarNode::String(value) => f.write_str(value),
            GrammarNode::Optional(child) => {
                f.write_fmt(format_args!("[ {} ]", child))
            }
            GrammarNode::Repetition(child, star) => {
                let suffix = if *star { "*" } else { "+" };
                match child.as_ref() {
                    GrammarNode::String(_) => f.write_fmt(format_args!("{}{}", child, suffix)),
                    _ => f.write_fmt(format_args!("( {} ){}", child, suffix)),
                }
            }
            GrammarNode::Sequence(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_grouped(f, child)?;
                }
                Ok(())
            }
            GrammarNode::Rhs(choices) => {
                for (i, choice) in choices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    match choice {
                        GrammarNode::Rhs(_) => write_grouped(f, choice)?,
                        _ => std::fmt::Display::fmt(choice, f)?,
                    }
                }
                Ok(())
            }
            GrammarNode::Rule(name, rhs) => f.write_fmt(format_args!("{}: {}", name, rhs)),
        }
    }
}

// a nested sequence or alternation needs parentheses to survive re-parsing
fn write_grouped(f: &mut std::fmt::Formatter<'_>, node: &GrammarNode) -> std::fmt::Result {
    match node {
        GrammarNode::Sequence(_) | GrammarNode::Rhs(_) => {
            f.write_fmt(format_args!("( {} )", node))
        }
        _ => std::fmt::Display::fmt(node, f),
    }
}

// rules in the order their productions appear in the grammar file
#[derive(Debug, Default)]
pub struct Grammar {
    pub rules: Vec<GrammarNode>,
}

impl Grammar {
    pub fn new() -> Grammar {
        Grammar { rules: Vec::new() }
    }

    // a later production with the same name replaces the earlier one in place
    pub fn insert(&mut self, rule: GrammarNode) {
        let name = match rule.rule_name() {
            Some(name) => String::from(name),
            None => return,
        };

        match self
            .rules
            .iter()
            .position(|r| r.rule_name() == Some(name.as_str()))
        {
            Some(idx) => self.rules[idx] = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn rule_named(&self, name: &str) -> Option<&GrammarNode> {
        self.rules.iter().find(|r| r.rule_name() == Some(name))
    }

    pub fn is_rule_name(&self, name: &str) -> bool {
        self.rule_named(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
