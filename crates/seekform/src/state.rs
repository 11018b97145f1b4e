//! Form state and its update function.
//!
//! [`QueryState`] is the whole model of one open search form. Hosts feed it
//! [`Event`]s and read back the compiled query or a [`FormView`]
//! projection. Every event that changes the form recompiles the query before
//! `apply` returns, so the compiled text is never stale.
//!
//! [`FormView`]: crate::FormView

use serde::Serialize;
use tracing::debug;

use crate::clause::{Clause, ClauseKind, RowKey};
use crate::combinator::Combinator;
use crate::compile::compile;
use crate::error::{FormError, Result};
use crate::field::FieldSet;
use crate::registry::{ClauseRegistry, ClauseSet, Outcome};

/// A user action on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Add a blank row to a collection.
    Append(ClauseKind),
    /// Remove the row at an index.
    Remove { kind: ClauseKind, index: usize },
    /// Remove the row with a key.
    RemoveKey { kind: ClauseKind, key: RowKey },
    /// Change a row's field.
    SetField {
        kind: ClauseKind,
        index: usize,
        field: String,
    },
    /// Change a row's keyword.
    SetKeyword {
        kind: ClauseKind,
        index: usize,
        keyword: String,
    },
    /// Choose the include combinator.
    SetCombinator(Combinator),
    /// Return to the initial form.
    Reset,
}

/// The keyword control that has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Focus {
    pub kind: ClauseKind,
    pub key: RowKey,
}

/// State of one open search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    registry: ClauseRegistry,
    combinator: Combinator,
    compiled: String,
    focus: Focus,
    default_field: String,
    initial_combinator: Combinator,
}

impl QueryState {
    /// Creates a form with one blank include row and one blank exclude row.
    pub fn new(default_field: impl Into<String>) -> Self {
        let default_field = default_field.into();
        let registry = ClauseRegistry::new(&default_field);
        let focus = Focus {
            kind: ClauseKind::Include,
            key: registry.include().rows()[0].key,
        };
        QueryState {
            registry,
            combinator: Combinator::default(),
            compiled: String::new(),
            focus,
            default_field,
            initial_combinator: Combinator::default(),
        }
    }

    /// Creates a form whose rows start on the field set's default field.
    pub fn for_fields(fields: &FieldSet) -> Self {
        QueryState::new(fields.default_field())
    }

    /// Sets the combinator the form starts with and returns to on reset.
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.initial_combinator = combinator;
        self.combinator = combinator;
        self.recompile();
        self
    }

    pub fn registry(&self) -> &ClauseRegistry {
        &self.registry
    }

    pub fn include(&self) -> &ClauseSet {
        self.registry.include()
    }

    pub fn exclude(&self) -> &ClauseSet {
        self.registry.exclude()
    }

    pub fn clauses(&self, kind: ClauseKind) -> &ClauseSet {
        self.registry.clauses(kind)
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// The derived query text.
    pub fn compiled_query(&self) -> &str {
        &self.compiled
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// Looks up a row by key.
    pub fn clause_by_key(&self, kind: ClauseKind, key: RowKey) -> Result<&Clause> {
        let clauses = self.registry.clauses(kind);
        clauses
            .index_of(key)
            .and_then(|index| clauses.get(index))
            .ok_or(FormError::UnknownRow { kind, key })
    }

    /// Applies one event, recompiling the query if the form changed.
    pub fn apply(&mut self, event: Event) -> Outcome {
        let outcome = match event {
            Event::Append(kind) => {
                let index = self.registry.append(kind);
                self.focus_row(kind, index);
                Outcome::Changed
            }
            Event::Remove { kind, index } => self.remove(kind, index),
            Event::RemoveKey { kind, key } => match self.registry.index_of(kind, key) {
                Some(index) => self.remove(kind, index),
                None => Outcome::Unchanged,
            },
            Event::SetField { kind, index, field } => {
                let outcome = self.registry.set_field(kind, index, &field);
                if outcome.is_changed() {
                    self.focus_row(kind, index);
                }
                outcome
            }
            Event::SetKeyword {
                kind,
                index,
                keyword,
            } => {
                let outcome = self.registry.set_keyword(kind, index, &keyword);
                if outcome.is_changed() {
                    self.focus_row(kind, index);
                }
                outcome
            }
            Event::SetCombinator(combinator) => {
                let changed = self.combinator != combinator;
                self.combinator = combinator;
                Outcome::from_changed(changed)
            }
            Event::Reset => {
                self.registry.reset(&self.default_field);
                self.combinator = self.initial_combinator;
                self.focus_row(ClauseKind::Include, 0);
                Outcome::Changed
            }
        };

        if outcome.is_changed() {
            self.recompile();
        }
        outcome
    }

    /// Appends a blank row to `kind`.
    pub fn append(&mut self, kind: ClauseKind) -> Outcome {
        self.apply(Event::Append(kind))
    }

    /// Removes the row at `index` from `kind`.
    pub fn remove_at(&mut self, kind: ClauseKind, index: usize) -> Outcome {
        self.apply(Event::Remove { kind, index })
    }

    pub fn set_field(&mut self, kind: ClauseKind, index: usize, field: impl Into<String>) -> Outcome {
        self.apply(Event::SetField {
            kind,
            index,
            field: field.into(),
        })
    }

    pub fn set_keyword(
        &mut self,
        kind: ClauseKind,
        index: usize,
        keyword: impl Into<String>,
    ) -> Outcome {
        self.apply(Event::SetKeyword {
            kind,
            index,
            keyword: keyword.into(),
        })
    }

    pub fn set_combinator(&mut self, combinator: Combinator) -> Outcome {
        self.apply(Event::SetCombinator(combinator))
    }

    fn remove(&mut self, kind: ClauseKind, index: usize) -> Outcome {
        let removed_key = self.registry.clauses(kind).get(index).map(|row| row.key);
        let outcome = self.registry.remove_at(kind, index);
        if outcome.is_changed() && removed_key == Some(self.focus.key) {
            let last = self.registry.clauses(kind).len() - 1;
            self.focus_row(kind, index.min(last));
        }
        outcome
    }

    fn focus_row(&mut self, kind: ClauseKind, index: usize) {
        if let Some(row) = self.registry.clauses(kind).get(index) {
            self.focus = Focus { kind, key: row.key };
        }
    }

    fn recompile(&mut self) {
        self.compiled = compile(&self.registry, self.combinator);
        debug!(
            include_rows = self.registry.include().len(),
            exclude_rows = self.registry.exclude().len(),
            combinator = %self.combinator,
            compiled = %self.compiled,
            "query recompiled"
        );
    }
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState::for_fields(&FieldSet::default())
    }
}

/// Pure form of [`QueryState::apply`]: consumes a state and returns the next.
pub fn update(mut state: QueryState, event: Event) -> QueryState {
    state.apply(event);
    state
}
