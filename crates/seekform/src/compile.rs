//! Query compiler.
//!
//! Turns registry contents into query text:
//!
//! ```text
//! include_part = join(" <COMBINATOR> ", "<field>:<keyword>"  for filled include rows)
//! exclude_part = join(" ",              "-<field>:<keyword>" for filled exclude rows)
//! query        = include_part [" " exclude_part]
//! ```
//!
//! Rows with an empty keyword contribute nothing. Keywords are inserted
//! verbatim. Compilation is total: any registry compiles, an empty one to
//! `""`.

use crate::combinator::Combinator;
use crate::registry::{ClauseRegistry, ClauseSet};

/// Joins the filled include rows with the combinator.
pub fn include_part(include: &ClauseSet, combinator: Combinator) -> String {
    include
        .terms()
        .collect::<Vec<_>>()
        .join(combinator.joiner())
}

/// Joins the filled exclude rows with single spaces.
pub fn exclude_part(exclude: &ClauseSet) -> String {
    exclude.terms().collect::<Vec<_>>().join(" ")
}

/// Compiles a registry into query text.
pub fn compile(registry: &ClauseRegistry, combinator: Combinator) -> String {
    let include = include_part(registry.include(), combinator);
    let exclude = exclude_part(registry.exclude());
    match (include.is_empty(), exclude.is_empty()) {
        (_, true) => include,
        (true, false) => exclude,
        (false, false) => format!("{} {}", include, exclude),
    }
}
