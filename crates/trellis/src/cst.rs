use std::fmt;
use std::fmt::Write;

use serde::Serialize;

use crate::token::MatchToken;
use crate::track::{Span, Track};

/// A node of the concrete syntax tree. Non-terminal nodes are named
/// after the grammar rule that produced them and hold children in source
/// order; terminal nodes are named after the token class and hold the
/// matched lexeme in `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CstNode {
    pub name: &'static str,
    pub value: Option<String>,
    pub loc: Option<Span>,
    pub children: Vec<CstNode>
}

impl CstNode {
    pub fn branch(name: &'static str) -> CstNode {
        CstNode { name, value: None, loc: None, children: Vec::new() }
    }

    pub fn leaf(name: &'static str, token: &MatchToken) -> CstNode {
        CstNode {
            name,
            value: Some(token.value.clone()),
            loc: Some(token.span),
            children: Vec::new()
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Span from the first located child to the last, or `None` when the
    /// node covers no tokens at all.
    pub fn loc_from_children(&self) -> Option<Span> {
        let first = self.children.iter().find_map(|c| c.loc)?;
        let last = self.children.iter().rev().find_map(|c| c.loc)?;
        Some(Span { start: first.start, end: last.end, index: first.index })
    }

    pub fn find(&self, name: &str) -> Option<&CstNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CstNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Indented one-node-per-line rendering, for diagnostics and tests.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0).unwrap();
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            out.push_str("  ");
        }
        match self.value {
            Some(ref value) => writeln!(out, "{} {:?}", self.name, value)?,
            None => writeln!(out, "{}", self.name)?
        }
        for child in &self.children {
            child.write_tree(out, depth + 1)?;
        }
        Ok(())
    }
}

impl Track for CstNode {
    fn location(&self) -> Option<Span> {
        self.loc
    }
}
