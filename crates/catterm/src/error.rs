//! User-visible failures.
//!
//! Every *recoverable* condition the reducer can hit (missing data, a
//! missing dictionary entry, a value lacking an expected facet, a `Shift`
//! with no enclosing `Reset`, ...) is handled internally by the thunk
//! protocol and never reaches this type. Only the two hard failures the
//! spec calls out — a malformed program, and a `Constant` naming no known
//! combinator — are surfaced here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The parser could not make sense of the source text.
    #[error("unreadable program: {reason} (in {source:?})")]
    Unreadable { source: String, reason: String },

    /// A `Constant` named something outside the combinator table.
    #[error("unknown combinator: {0}")]
    Unknown(String),
}

impl Error {
    pub fn unreadable(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Unreadable {
            source: source.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
