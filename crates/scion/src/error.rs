use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LowerError {
    #[error("unexpected {found} node inside {parent}")]
    UnexpectedNode { parent: &'static str, found: &'static str },

    #[error("{parent} node is missing a {wanted} child")]
    MissingChild { parent: &'static str, wanted: &'static str },

    #[error("unknown operator {found}")]
    UnknownOperator { found: &'static str },

    #[error("malformed numeric literal {text:?}")]
    BadNumber { text: String }
}
