//! A hand-written ECMAScript lexer. Turns source text into the flat
//! `MatchToken` array consumed by the espalier engine. Semicolons are
//! required by the downstream grammar, so no automatic-semicolon state
//! is tracked here, and regexp literals are not lexed.

mod error;
mod lexer;
mod word;

pub use error::LexError;
pub use lexer::Lexer;

use trellis::MatchToken;

pub fn lex(src: &str) -> Result<Vec<MatchToken>, LexError> {
    Lexer::new(src).tokens()
}
