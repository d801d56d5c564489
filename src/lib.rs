//! A fault-tolerant parsing library.
//!
//! Espalier is a combinator-style recursive-descent engine that builds
//! a concrete syntax tree from a token stream, plus the ECMAScript
//! grammars that drive it (ES5, and an ES2015 module dialect layered on
//! top). Speculative matching backtracks over ordered alternatives, and
//! the top-level item list recovers from syntax errors so a partial
//! tree still comes back.
//!
//! Lexing lives in the `sprig` crate and AST lowering in `scion`; this
//! crate re-exports the one-call entry points that wire them together.

pub mod engine;
pub mod error;
pub mod grammar;
pub mod result;
pub mod terminals;
mod builder;
mod cursor;

pub use engine::{Grammar, Parser, RuleFn};
pub use error::{Error, Fail, ParseError, ParseErrorKind};
pub use result::Match;
pub use trellis::{CstNode, Kind, MatchToken, Posn, Span};

use grammar::{Es2015Grammar, Es5Grammar};

/// Parse module source with the ES2015 grammar.
pub fn module(src: &str) -> Result<CstNode, Error> {
    let tokens = sprig::lex(src)?;
    Ok(Parser::parse(&Es2015Grammar, &tokens, "Program")?)
}

/// Parse script source with the ES5 grammar.
pub fn script(src: &str) -> Result<CstNode, Error> {
    let tokens = sprig::lex(src)?;
    Ok(Parser::parse(&Es5Grammar, &tokens, "Program")?)
}

/// Parse module source and lower the tree to the AST in one step.
pub fn module_ast(src: &str) -> Result<scion::ast::Program, Error> {
    let cst = module(src)?;
    Ok(scion::lower::lower_program(&cst)?)
}
