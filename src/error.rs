use crate::field::FieldKind;
use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Error {
    /// Line does not consist of five schedule fields followed by a command.
    ///
    /// This is how comments, blank lines and environment assignments in a
    /// crontab manifest themselves, so callers iterating over a whole file
    /// should skip the line rather than abort.
    #[error("not a crontab entry: {0}")]
    NotAnEntry(String),
    /// Schedule expression is not five fields or a known `@` alias.
    #[error("invalid schedule expression: {0}")]
    InvalidSchedule(String),
    /// Token is neither a valid number nor a known name, or is out of bounds.
    #[error("invalid {kind} value: {value}")]
    InvalidValue {
        /// Field the token belongs to.
        kind: FieldKind,
        /// The offending token.
        value: String,
    },
    /// Range with start greater than end, or an endpoint out of bounds.
    #[error("invalid {kind} range: {value}")]
    InvalidRange {
        /// Field the range belongs to.
        kind: FieldKind,
        /// The offending expression.
        value: String,
    },
    /// Step expression with an invalid left-hand side or step count.
    #[error("invalid {kind} step expression: {value}")]
    InvalidStep {
        /// Field the expression belongs to.
        kind: FieldKind,
        /// The offending expression.
        value: String,
    },
}
