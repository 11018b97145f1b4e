//! Error types for the seekform crate.

use thiserror::Error;

use crate::clause::{ClauseKind, RowKey};

/// Errors raised at the edges of the form model.
///
/// The registry itself never fails: out-of-range removals and edits are
/// reported as [`Outcome::Unchanged`](crate::Outcome::Unchanged). These
/// errors cover input that arrives from outside the model as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Combinator text was neither `AND` nor `OR`.
    #[error("unknown combinator '{0}', expected AND or OR")]
    UnknownCombinator(String),

    /// Field name is not part of the configured field set.
    #[error("unknown field '{field}', expected one of: {allowed}")]
    UnknownField { field: String, allowed: String },

    /// A field set must offer at least one field.
    #[error("field set is empty")]
    EmptyFieldSet,

    /// Clause kind text was neither `include` nor `exclude`.
    #[error("unknown clause kind '{0}', expected include or exclude")]
    UnknownKind(String),

    /// No row with this key exists in the collection.
    #[error("no {kind} row with key {key}")]
    UnknownRow { kind: ClauseKind, key: RowKey },
}

/// Result type for seekform operations.
pub type Result<T> = std::result::Result<T, FormError>;
