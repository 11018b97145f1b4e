//! Clause registry.
//!
//! The [`ClauseRegistry`] owns the include and exclude collections of a form
//! and is the single source of truth for row order, indices and keys.
//!
//! Every collection keeps these invariants after any operation returns:
//!
//! ```text
//! len >= 1
//! rows[i].index == i          for every i
//! keys are unique and never reused within one registry
//! ```
//!
//! Operations that cannot apply (unknown index or key, removing the last
//! row) leave the collection untouched and report [`Outcome::Unchanged`].

use serde::Serialize;
use tracing::{debug, trace};

use crate::clause::{Clause, ClauseKind, RowKey};

/// Whether an operation modified the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed.
    Changed,
    /// The operation did not apply; state is exactly as before.
    Unchanged,
}

impl Outcome {
    pub fn is_changed(self) -> bool {
        matches!(self, Outcome::Changed)
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }
}

/// An ordered, never-empty collection of rows of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseSet {
    kind: ClauseKind,
    rows: Vec<Clause>,
}

impl ClauseSet {
    fn new(kind: ClauseKind, key: RowKey, field: &str) -> Self {
        ClauseSet {
            kind,
            rows: vec![Clause::new(key, kind, 0, field)],
        }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    /// Number of rows. Always at least one.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Clause] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.rows.iter()
    }

    /// Row at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Clause> {
        self.rows.get(index)
    }

    /// Current index of the row with `key`.
    pub fn index_of(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }

    /// Whether rows may be removed. A single remaining row is pinned.
    pub fn is_removable(&self) -> bool {
        self.rows.len() > 1
    }

    /// Query terms of the filled rows, in order.
    pub fn terms(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().filter_map(Clause::term)
    }

    /// Appends a row that copies the last row's field with a blank keyword.
    fn append(&mut self, key: RowKey) -> usize {
        let index = self.rows.len();
        let field = self
            .rows
            .last()
            .map(|row| row.field.clone())
            .unwrap_or_default();
        self.rows.push(Clause::new(key, self.kind, index, field));
        self.renumber();
        debug!(kind = %self.kind, index, len = self.rows.len(), "clause appended");
        index
    }

    fn remove_at(&mut self, index: usize) -> Outcome {
        if index >= self.rows.len() {
            trace!(kind = %self.kind, index, "remove ignored: no such row");
            return Outcome::Unchanged;
        }
        if !self.is_removable() {
            trace!(kind = %self.kind, index, "remove ignored: last row is pinned");
            return Outcome::Unchanged;
        }
        self.rows.remove(index);
        self.renumber();
        debug!(kind = %self.kind, index, len = self.rows.len(), "clause removed");
        Outcome::Changed
    }

    fn set_field(&mut self, index: usize, field: &str) -> Outcome {
        match self.rows.get_mut(index) {
            Some(row) if row.field != field => {
                row.field = field.to_string();
                trace!(kind = %self.kind, index, field, "field set");
                Outcome::Changed
            }
            _ => Outcome::Unchanged,
        }
    }

    fn set_keyword(&mut self, index: usize, keyword: &str) -> Outcome {
        match self.rows.get_mut(index) {
            Some(row) if row.keyword != keyword => {
                row.keyword = keyword.to_string();
                trace!(kind = %self.kind, index, keyword, "keyword set");
                Outcome::Changed
            }
            _ => Outcome::Unchanged,
        }
    }

    /// Regenerates every index from its row's position.
    fn renumber(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.index = position;
        }
        debug_assert!(self.is_dense());
    }

    /// Returns `true` if indices are exactly `0..len` in order.
    pub fn is_dense(&self) -> bool {
        self.rows.iter().enumerate().all(|(i, row)| row.index == i)
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Include and exclude collections plus the row key generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseRegistry {
    include: ClauseSet,
    exclude: ClauseSet,
    #[serde(skip)]
    next_key: u64,
}

impl ClauseRegistry {
    /// Creates a registry with one blank row in each collection.
    pub fn new(default_field: &str) -> Self {
        ClauseRegistry {
            include: ClauseSet::new(ClauseKind::Include, RowKey(0), default_field),
            exclude: ClauseSet::new(ClauseKind::Exclude, RowKey(1), default_field),
            next_key: 2,
        }
    }

    pub fn include(&self) -> &ClauseSet {
        &self.include
    }

    pub fn exclude(&self) -> &ClauseSet {
        &self.exclude
    }

    /// The collection for `kind`.
    pub fn clauses(&self, kind: ClauseKind) -> &ClauseSet {
        match kind {
            ClauseKind::Include => &self.include,
            ClauseKind::Exclude => &self.exclude,
        }
    }

    fn clauses_mut(&mut self, kind: ClauseKind) -> &mut ClauseSet {
        match kind {
            ClauseKind::Include => &mut self.include,
            ClauseKind::Exclude => &mut self.exclude,
        }
    }

    fn allocate_key(&mut self) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Appends a blank row to `kind`, returning its index.
    pub fn append(&mut self, kind: ClauseKind) -> usize {
        let key = self.allocate_key();
        self.clauses_mut(kind).append(key)
    }

    /// Removes the row at `index`, then renumbers.
    pub fn remove_at(&mut self, kind: ClauseKind, index: usize) -> Outcome {
        self.clauses_mut(kind).remove_at(index)
    }

    /// Removes the row with `key`, wherever it currently sits.
    pub fn remove_key(&mut self, kind: ClauseKind, key: RowKey) -> Outcome {
        match self.index_of(kind, key) {
            Some(index) => self.remove_at(kind, index),
            None => Outcome::Unchanged,
        }
    }

    pub fn set_field(&mut self, kind: ClauseKind, index: usize, field: &str) -> Outcome {
        self.clauses_mut(kind).set_field(index, field)
    }

    pub fn set_keyword(&mut self, kind: ClauseKind, index: usize, keyword: &str) -> Outcome {
        self.clauses_mut(kind).set_keyword(index, keyword)
    }

    pub fn set_field_by_key(&mut self, kind: ClauseKind, key: RowKey, field: &str) -> Outcome {
        match self.index_of(kind, key) {
            Some(index) => self.set_field(kind, index, field),
            None => Outcome::Unchanged,
        }
    }

    pub fn set_keyword_by_key(&mut self, kind: ClauseKind, key: RowKey, keyword: &str) -> Outcome {
        match self.index_of(kind, key) {
            Some(index) => self.set_keyword(kind, index, keyword),
            None => Outcome::Unchanged,
        }
    }

    /// Current index of the row with `key` in `kind`.
    pub fn index_of(&self, kind: ClauseKind, key: RowKey) -> Option<usize> {
        self.clauses(kind).index_of(key)
    }

    /// Drops all rows and starts over with one blank row per collection.
    ///
    /// Keys keep counting up so that keys from before the reset never
    /// name a new row.
    pub fn reset(&mut self, default_field: &str) {
        let include = self.allocate_key();
        let exclude = self.allocate_key();
        self.include = ClauseSet::new(ClauseKind::Include, include, default_field);
        self.exclude = ClauseSet::new(ClauseKind::Exclude, exclude, default_field);
        debug!("registry reset");
    }
}
