//! Boolean combinator joining include clauses.
//!
//! The [`Combinator`] is the only operator a form user chooses. It applies
//! between include clauses; exclude clauses are always space-joined.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Operator placed between compiled include clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    /// Every include clause must match.
    #[default]
    And,
    /// At least one include clause must match.
    Or,
}

impl Combinator {
    /// The literal token written into the compiled query.
    pub fn token(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }

    /// The joiner placed between two include terms, e.g. `" AND "`.
    pub fn joiner(self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }

    /// Returns the other combinator.
    pub fn toggled(self) -> Combinator {
        match self {
            Combinator::And => Combinator::Or,
            Combinator::Or => Combinator::And,
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Combinator {
    type Err = FormError;

    /// Parses `and`/`or` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Combinator::And),
            "OR" => Ok(Combinator::Or),
            _ => Err(FormError::UnknownCombinator(s.to_string())),
        }
    }
}
