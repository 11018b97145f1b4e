//! Clause rows.
//!
//! A [`Clause`] is one row of the form: a field, a keyword, and the dense
//! index it currently occupies in its collection. Which collection it lives
//! in is its [`ClauseKind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The two clause collections of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    /// Positive terms, joined by the form's combinator.
    Include,
    /// Negated terms, always space-joined.
    Exclude,
}

impl ClauseKind {
    /// Both kinds, in display order.
    pub const ALL: [ClauseKind; 2] = [ClauseKind::Include, ClauseKind::Exclude];

    /// Returns `true` for the exclude collection.
    pub fn is_negated(self) -> bool {
        matches!(self, ClauseKind::Exclude)
    }

    /// Lower-case name used in control identifiers and commands.
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseKind::Include => "include",
            ClauseKind::Exclude => "exclude",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClauseKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" | "inc" | "+" => Ok(ClauseKind::Include),
            "exclude" | "exc" | "not" | "-" => Ok(ClauseKind::Exclude),
            _ => Err(FormError::UnknownKind(s.to_string())),
        }
    }
}

/// Stable identity of a row.
///
/// Keys are handed out once per form and never reused, so a key keeps
/// naming the same row while its index shifts under removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub u64);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of a clause collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    /// Stable identity of the row.
    pub key: RowKey,
    /// Collection the row belongs to.
    pub kind: ClauseKind,
    /// Position in the collection. Maintained by the registry.
    pub index: usize,
    /// Searchable attribute, e.g. `subject`.
    pub field: String,
    /// Search text. Empty means the row is not filled in yet.
    pub keyword: String,
}

impl Clause {
    /// Creates an unfilled row.
    pub fn new(key: RowKey, kind: ClauseKind, index: usize, field: impl Into<String>) -> Self {
        Clause {
            key,
            kind,
            index,
            field: field.into(),
            keyword: String::new(),
        }
    }

    /// Whether this row is a negated term.
    pub fn negated(&self) -> bool {
        self.kind.is_negated()
    }

    /// Returns `true` if the keyword is filled in.
    pub fn is_filled(&self) -> bool {
        !self.keyword.is_empty()
    }

    /// Writes the query term for this row, or `None` if it is unfilled.
    ///
    /// The keyword is inserted verbatim.
    pub fn term(&self) -> Option<String> {
        if !self.is_filled() {
            return None;
        }
        let sign = if self.negated() { "-" } else { "" };
        Some(format!("{}{}:{}", sign, self.field, self.keyword))
    }
}
