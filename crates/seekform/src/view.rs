//! Render projection of a form.
//!
//! [`FormView`] is what a host draws. It is built from a [`QueryState`] and
//! never read back: hosts turn user input into [`Event`]s addressed by kind
//! and index (or row key), not by parsing control identifiers.
//!
//! [`Event`]: crate::Event

use std::fmt;

use serde::{Serialize, Serializer};

use crate::clause::{ClauseKind, RowKey};
use crate::combinator::Combinator;
use crate::registry::ClauseSet;
use crate::state::QueryState;

/// Which control of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSlot {
    /// Field selector.
    Field,
    /// Keyword text input.
    Keyword,
}

impl ControlSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlSlot::Field => "field",
            ControlSlot::Keyword => "keyword",
        }
    }
}

/// Identifier of one row control, written as `<kind>-<slot>-<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId {
    pub kind: ClauseKind,
    pub slot: ControlSlot,
    pub index: usize,
}

impl ControlId {
    pub fn new(kind: ClauseKind, slot: ControlSlot, index: usize) -> Self {
        ControlId { kind, slot, index }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.kind, self.slot.as_str(), self.index)
    }
}

impl Serialize for ControlId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub key: RowKey,
    pub index: usize,
    pub field: String,
    pub keyword: String,
    /// Whether the row's remove control is shown.
    pub removable: bool,
    pub field_control: ControlId,
    pub keyword_control: ControlId,
}

/// Everything a host needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub include: Vec<RowView>,
    pub exclude: Vec<RowView>,
    pub combinator: Combinator,
    pub compiled_query: String,
    /// Keyword control with input focus.
    pub focus: ControlId,
}

impl FormView {
    pub fn rows(&self, kind: ClauseKind) -> &[RowView] {
        match kind {
            ClauseKind::Include => &self.include,
            ClauseKind::Exclude => &self.exclude,
        }
    }
}

fn project_rows(set: &ClauseSet) -> Vec<RowView> {
    let removable = set.is_removable();
    set.iter()
        .map(|row| RowView {
            key: row.key,
            index: row.index,
            field: row.field.clone(),
            keyword: row.keyword.clone(),
            removable,
            field_control: ControlId::new(row.kind, ControlSlot::Field, row.index),
            keyword_control: ControlId::new(row.kind, ControlSlot::Keyword, row.index),
        })
        .collect()
}

impl From<&QueryState> for FormView {
    fn from(state: &QueryState) -> Self {
        let focus = state.focus();
        let focus_index = state
            .registry()
            .index_of(focus.kind, focus.key)
            .unwrap_or_default();
        FormView {
            include: project_rows(state.include()),
            exclude: project_rows(state.exclude()),
            combinator: state.combinator(),
            compiled_query: state.compiled_query().to_string(),
            focus: ControlId::new(focus.kind, ControlSlot::Keyword, focus_index),
        }
    }
}

impl QueryState {
    /// Projects the current state for rendering.
    pub fn view(&self) -> FormView {
        FormView::from(self)
    }
}
