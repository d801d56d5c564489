//! The abstract syntax tree grafted onto the concrete one: AST types
//! for the ECMAScript subset the espalier grammars cover, and the
//! lowering pass that walks a CST into them.

pub mod ast;
pub mod error;
pub mod lower;

pub use ast::Program;
pub use error::LowerError;
pub use lower::lower_program;
