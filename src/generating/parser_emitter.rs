use std::io;

use crate::grammar::ebnf_parser;
use crate::grammar::grammar_node::{Grammar, GrammarNode};

use super::code_writer::CodeWriter;
use super::first_sets::FirstSets;
use super::node_ids::NodeIds;

// walks the id map and writes one recursive descent procedure per grammar
// node, plus a named entry point per rule. every procedure appends to a
// local accumulator and splices it into the caller's collector only on
// success, so a failed attempt leaves cursor and collector untouched
pub struct ParserEmitter<'g> {
    grammar: &'g Grammar,
    ids: &'g NodeIds<'g>,
    first: &'g FirstSets,
}

impl<'g> ParserEmitter<'g> {
    pub fn new(grammar: &'g Grammar, ids: &'g NodeIds<'g>, first: &'g FirstSets) -> ParserEmitter<'g> {
        ParserEmitter {
            grammar,
            ids,
            first,
        }
    }

    pub fn emit(&self, w: &mut CodeWriter) -> io::Result<()> {
        w.line("// parser procedures generated from the grammar; do not edit")?;
        w.line("")?;
        self.emit_rule_names(w)?;

        for (id, node) in self.ids.iter() {
            w.line("")?;
            self.emit_node(id, node, w)?;
        }
        Ok(())
    }

    // one variant per grammar rule; rule AST nodes are bound to it
    fn emit_rule_names(&self, w: &mut CodeWriter) -> io::Result<()> {
        w.open("pub enum RuleName {")?;
        for rule in &self.grammar.rules {
            if let Some(name) = rule.rule_name() {
                w.line(&format!("{},", variant_name(name)))?;
            }
        }
        w.close("}")?;
        w.line("")?;

        w.open("impl RuleName {")?;
        w.open("pub fn as_str(&self) -> &'static str {")?;
        w.open("match self {")?;
        for rule in &self.grammar.rules {
            if let Some(name) = rule.rule_name() {
                w.line(&format!("RuleName::{} => \"{}\",", variant_name(name), name))?;
            }
        }
        w.close("}")?;
        w.close("}")?;
        w.close("}")?;
        Ok(())
    }

    fn emit_node(&self, id: usize, node: &GrammarNode, w: &mut CodeWriter) -> io::Result<()> {
        match node {
            GrammarNode::String(value) => {
                if self.grammar.is_rule_name(value) {
                    self.emit_rule_call(id, node, value, w)
                } else {
                    self.emit_terminal(id, node, value, w)
                }
            }
            GrammarNode::Optional(child) => self.emit_optional(id, node, child, w),
            GrammarNode::Repetition(child, star) => {
                self.emit_repetition(id, node, child, *star, w)
            }
            GrammarNode::Sequence(children) => self.emit_sequence(id, node, children, w),
            GrammarNode::Rhs(choices) => self.emit_rhs(id, node, choices, w),
            GrammarNode::Rule(name, rhs) => self.emit_rule(id, node, name, rhs, w),
        }
    }

    fn open_node_proc(&self, id: usize, node: &GrammarNode, w: &mut CodeWriter) -> io::Result<()> {
        w.line(&format!("// node {}: {}", id, node))?;
        w.open(&format!(
            "fn parse_node_{}(stream: &mut TokenStream, out: &mut Vec<AstNode>) -> bool {{",
            id
        ))
    }

    // one matching token, pushed as a leaf
    fn emit_terminal(
        &self,
        id: usize,
        node: &GrammarNode,
        value: &str,
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        self.open_node_proc(id, node, w)?;

        let (method, spelling) = if ebnf_parser::is_literal(value) {
            ("take_text", literal_text(value))
        } else {
            ("take_kind", value)
        };

        w.open(&format!(
            "if let Some(tok) = stream.{}(\"{}\") {{",
            method,
            escaped(spelling)
        ))?;
        w.line("out.push(AstNode::leaf(tok));")?;
        w.line("return true;")?;
        w.close("}")?;
        w.line("false")?;
        w.close("}")
    }

    // a reference to another rule delegates to its entry point
    fn emit_rule_call(
        &self,
        id: usize,
        node: &GrammarNode,
        rule_name: &str,
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        self.open_node_proc(id, node, w)?;
        w.line(&format!("parse_{}(stream, out)", rule_name))?;
        w.close("}")
    }

    // zero or one: never fails
    fn emit_optional(
        &self,
        id: usize,
        node: &GrammarNode,
        child: &GrammarNode,
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        self.open_node_proc(id, node, w)?;
        w.line("let mark = stream.mark();")?;
        w.line("let mut acc = Vec::new();")?;
        w.open(&format!(
            "if parse_node_{}(stream, &mut acc) {{",
            self.child_id(child)
        ))?;
        w.line("out.append(&mut acc);")?;
        w.chain("} else {")?;
        w.line("stream.reset(mark);")?;
        w.close("}")?;
        w.line("true")?;
        w.close("}")
    }

    // iterate the child until it fails; `+` needs at least one pass
    fn emit_repetition(
        &self,
        id: usize,
        node: &GrammarNode,
        child: &GrammarNode,
        star: bool,
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        self.open_node_proc(id, node, w)?;
        if !star {
            w.line("let mut count = 0;")?;
        }
        w.line("let mut acc = Vec::new();")?;
        w.open("loop {")?;
        w.line("let mark = stream.mark();")?;
        w.line("let mut one = Vec::new();")?;
        w.open(&format!(
            "if !parse_node_{}(stream, &mut one) {{",
            self.child_id(child)
        ))?;
        w.line("stream.reset(mark);")?;
        w.line("break;")?;
        w.close("}")?;
        w.line("// a pass that consumed nothing would never stop")?;
        w.open("if stream.mark() == mark {")?;
        w.line("break;")?;
        w.close("}")?;
        w.line("acc.append(&mut one);")?;
        if !star {
            w.line("count += 1;")?;
        }
        w.close("}")?;
        if !star {
            w.open("if count == 0 {")?;
            w.line("return false;")?;
            w.close("}")?;
        }
        w.line("out.append(&mut acc);")?;
        w.line("true")?;
        w.close("}")
    }

    // all children in order, or nothing at all
    fn emit_sequence(
        &self,
        id: usize,
        node: &GrammarNode,
        children: &[GrammarNode],
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        self.open_node_proc(id, node, w)?;
        w.line("let mark = stream.mark();")?;
        w.line("let mut acc = Vec::new();")?;
        for child in children {
            w.open(&format!(
                "if !parse_node_{}(stream, &mut acc) {{",
                self.child_id(child)
            ))?;
            w.line("stream.reset(mark);")?;
            w.line("return false;")?;
            w.close("}")?;
        }
        w.line("out.append(&mut acc);")?;
        w.line("true")?;
        w.close("}")
    }

    // ordered choice: the first alternative that matches wins. the FIRST set
    // of each alternative gates the attempt so hopeless branches are skipped
    fn emit_rhs(
        &self,
        id: usize,
        node: &GrammarNode,
        choices: &[GrammarNode],
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        self.open_node_proc(id, node, w)?;
        w.line("let mark = stream.mark();")?;
        for choice in choices {
            let cid = self.child_id(choice);
            let lookahead = self
                .first
                .of(cid)
                .iter()
                .map(|terminal| format!("\"{}\"", escaped(terminal)))
                .collect::<Vec<String>>()
                .join(", ");

            w.open(&format!("if stream.next_matches_any(&[{}]) {{", lookahead))?;
            w.line("let mut acc = Vec::new();")?;
            w.open(&format!("if parse_node_{}(stream, &mut acc) {{", cid))?;
            w.line("out.append(&mut acc);")?;
            w.line("return true;")?;
            w.close("}")?;
            w.line("stream.reset(mark);")?;
            w.close("}")?;
        }
        w.line("false")?;
        w.close("}")
    }

    // the named entry point wraps a fresh rule node around the child results
    fn emit_rule(
        &self,
        id: usize,
        node: &GrammarNode,
        name: &str,
        rhs: &GrammarNode,
        w: &mut CodeWriter,
    ) -> io::Result<()> {
        w.line(&format!("// rule: {}", node))?;
        w.open(&format!(
            "pub fn parse_{}(stream: &mut TokenStream, out: &mut Vec<AstNode>) -> bool {{",
            name
        ))?;
        w.line("let mut acc = Vec::new();")?;
        w.open(&format!(
            "if !parse_node_{}(stream, &mut acc) {{",
            self.child_id(rhs)
        ))?;
        w.line("return false;")?;
        w.close("}")?;
        w.line(&format!(
            "out.push(AstNode::rule(RuleName::{}.as_str(), acc));",
            variant_name(name)
        ))?;
        w.line("true")?;
        w.close("}")?;
        w.line("")?;

        w.open(&format!(
            "fn parse_node_{}(stream: &mut TokenStream, out: &mut Vec<AstNode>) -> bool {{",
            id
        ))?;
        w.line(&format!("parse_{}(stream, out)", name))?;
        w.close("}")
    }

    fn child_id(&self, child: &GrammarNode) -> usize {
        self.ids
            .id_of(child)
            .expect("child node was never assigned an id")
    }
}

fn literal_text(value: &str) -> &str {
    let inner = value.strip_prefix('\'').unwrap_or(value);
    inner.strip_suffix('\'').unwrap_or(inner)
}

fn escaped(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

// snake_case rule names become CamelCase enum variants
fn variant_name(name: &str) -> String {
    let mut out = String::new();
    let mut upper_next = true;

    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
