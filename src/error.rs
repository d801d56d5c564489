use thiserror::Error;
use trellis::{MatchToken, Posn};

/// A failure raised while matching. Recoverable failures drive the
/// combinators' backtracking; fatal failures indicate a grammar or
/// engine bug and unwind straight out of the parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fail {
    #[error("expected {expected}, found {} {:?}", .got.kind.name(), .got.value)]
    TokenMismatch { expected: &'static str, got: Box<MatchToken> },

    #[error("unexpected end of input at token {at}")]
    UnexpectedEnd { at: u32 },

    #[error("no alternative matched at token {at} (tried {tried:?})")]
    NoAlternative { at: u32, tried: Vec<&'static str> },

    #[error("repetition body matched without consuming input at token {at}")]
    NonProgressingRepetition { at: u32 },

    #[error("checkpoint imbalance: expected sequence {expected}, have {live} live")]
    CheckpointImbalance { expected: usize, live: usize },

    #[error("grammar {grammar} has no rule named {rule:?}")]
    UnknownRule { grammar: &'static str, rule: &'static str }
}

impl Fail {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Fail::TokenMismatch { .. } | Fail::UnexpectedEnd { .. } | Fail::NoAlternative { .. }
        )
    }

    pub fn kind(&self) -> ParseErrorKind {
        match *self {
            Fail::TokenMismatch { .. } => ParseErrorKind::TokenMismatch,
            Fail::UnexpectedEnd { .. } => ParseErrorKind::UnexpectedEnd,
            Fail::NoAlternative { .. } => ParseErrorKind::NoAlternative,
            Fail::NonProgressingRepetition { .. } => ParseErrorKind::NonProgressingRepetition,
            Fail::CheckpointImbalance { .. } => ParseErrorKind::CheckpointImbalance,
            Fail::UnknownRule { .. } => ParseErrorKind::UnknownRule
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseErrorKind {
    TokenMismatch,
    UnexpectedEnd,
    NoAlternative,
    NonProgressingRepetition,
    CheckpointImbalance,
    UnknownRule
}

/// The offending token of a [`ParseError`], reduced to what diagnostics
/// need.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundToken {
    pub name: &'static str,
    pub value: String
}

/// The public, user-visible parse failure. Positions follow the
/// furthest-reach convention: the deepest token index any attempt got
/// to, with the expected terminals merged across the attempts that
/// failed there.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub at: Posn,
    pub index: u32,
    pub expected: Vec<&'static str>,
    pub got: Option<FoundToken>,
    pub message: String
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        at: Posn,
        index: u32,
        expected: Vec<&'static str>,
        got: Option<FoundToken>
    ) -> ParseError {
        let mut message = format!("syntax error at line {}, column {}: ", at.line, at.column);
        match expected.len() {
            0 => message.push_str("unexpected input"),
            1 => message.push_str(&format!("expected {}", expected[0])),
            _ => message.push_str(&format!("expected one of {}", expected.join(", ")))
        }
        match got {
            Some(ref found) => message.push_str(&format!(", found {} {:?}", found.name, found.value)),
            None => message.push_str(", found end of input")
        }
        ParseError { kind, at, index, expected, got, message }
    }
}

/// Top-level error for the source-to-tree entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] sprig::LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Lower(#[from] scion::LowerError)
}
