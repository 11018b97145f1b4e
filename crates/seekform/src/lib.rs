//! Seekform - clause registry and query compiler for dynamic search forms.
//!
//! A search form holds two growable lists of rows: **include** rows, joined
//! by a user-chosen combinator, and **exclude** rows, always negated and
//! space-joined. Seekform keeps those rows consistent while they are added,
//! edited and removed, and derives the query text after every change.
//!
//! - Rows carry dense indices `0..n` that are regenerated from position on
//!   every structural change, plus a stable [`RowKey`] that never changes.
//! - Each collection always keeps at least one row.
//! - Rows with an empty keyword are left out of the query.
//!
//! # Quick Start
//!
//! ```rust
//! use seekform::{ClauseKind, Combinator, QueryState};
//!
//! let mut form = QueryState::new("title");
//! form.set_keyword(ClauseKind::Include, 0, "cats");
//! form.append(ClauseKind::Include);
//! form.set_field(ClauseKind::Include, 1, "author");
//! form.set_keyword(ClauseKind::Include, 1, "smith");
//! form.set_field(ClauseKind::Exclude, 0, "tag");
//! form.set_keyword(ClauseKind::Exclude, 0, "archived");
//!
//! assert_eq!(
//!     form.compiled_query(),
//!     "title:cats AND author:smith -tag:archived"
//! );
//!
//! form.set_combinator(Combinator::Or);
//! assert_eq!(
//!     form.compiled_query(),
//!     "title:cats OR author:smith -tag:archived"
//! );
//! ```
//!
//! # Query Format
//!
//! ```text
//! query = include_part [" " exclude_part]
//!
//! include_part = "<field>:<keyword>" { " AND " | " OR " "<field>:<keyword>" }
//! exclude_part = "-<field>:<keyword>" { " " "-<field>:<keyword>" }
//! ```
//!
//! Keywords are copied verbatim. Seekform only writes queries; it never
//! parses one back into rows.
//!
//! # Driving a Form
//!
//! Hosts translate UI input into [`Event`]s and pass them to
//! [`QueryState::apply`] (or the by-value [`update`]). Rendering goes through
//! [`QueryState::view`], which produces a [`FormView`] with one
//! [`RowView`] per row and the [`ControlId`] of every control.

mod clause;
mod combinator;
mod compile;
mod error;
mod field;
mod registry;
mod state;
mod view;

// Re-export public API
pub use clause::{Clause, ClauseKind, RowKey};
pub use combinator::Combinator;
pub use compile::{compile, exclude_part, include_part};
pub use error::{FormError, Result};
pub use field::{FieldSet, DEFAULT_FIELDS};
pub use registry::{ClauseRegistry, ClauseSet, Outcome};
pub use state::{update, Event, Focus, QueryState};
pub use view::{ControlId, ControlSlot, FormView, RowView};
