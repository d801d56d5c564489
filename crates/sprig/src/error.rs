use thiserror::Error;
use trellis::Posn;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("illegal character {found:?} at line {}, column {}", .at.line, .at.column)]
    IllegalChar { found: char, at: Posn },
    #[error("unterminated string literal starting at line {}, column {}", .at.line, .at.column)]
    UnterminatedString { at: Posn },
    #[error("unterminated block comment starting at line {}, column {}", .at.line, .at.column)]
    UnterminatedComment { at: Posn },
    #[error("missing digits after {prefix:?} at line {}, column {}", .at.line, .at.column)]
    MissingDigits { prefix: &'static str, at: Posn },
    #[error("missing exponent at line {}, column {}", .at.line, .at.column)]
    MissingExponent { at: Posn }
}
