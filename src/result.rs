use crate::error::Fail;

/// Result of a single matching step. `Err` carries a [`Fail`] that the
/// enclosing combinator either recovers from or propagates.
pub type Match<T> = std::result::Result<T, Fail>;
