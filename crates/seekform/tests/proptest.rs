//! Property-based tests for seekform using proptest.

use proptest::prelude::*;
use seekform::{ClauseKind, Combinator, Event, Outcome, QueryState, RowKey};

// ============================================================================
// Test helpers
// ============================================================================

fn kind_strategy() -> impl Strategy<Value = ClauseKind> {
    prop_oneof![Just(ClauseKind::Include), Just(ClauseKind::Exclude)]
}

fn combinator_strategy() -> impl Strategy<Value = Combinator> {
    prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
}

// Indices deliberately range past typical collection sizes so that
// out-of-range removals and edits are exercised too.
fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => kind_strategy().prop_map(Event::Append),
        3 => (kind_strategy(), 0usize..8).prop_map(|(kind, index)| Event::Remove { kind, index }),
        1 => (kind_strategy(), 0u64..16).prop_map(|(kind, key)| Event::RemoveKey {
            kind,
            key: RowKey(key)
        }),
        2 => (kind_strategy(), 0usize..8, "[a-z]{1,6}").prop_map(|(kind, index, field)| {
            Event::SetField { kind, index, field }
        }),
        3 => (kind_strategy(), 0usize..8, "[a-z]{0,6}").prop_map(|(kind, index, keyword)| {
            Event::SetKeyword { kind, index, keyword }
        }),
        1 => combinator_strategy().prop_map(Event::SetCombinator),
    ]
}

fn assert_dense(state: &QueryState) -> Result<(), TestCaseError> {
    for kind in ClauseKind::ALL {
        let indices: Vec<usize> = state.clauses(kind).iter().map(|c| c.index).collect();
        let expected: Vec<usize> = (0..state.clauses(kind).len()).collect();
        prop_assert_eq!(indices, expected);
    }
    Ok(())
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Indices equal positions after every event.
    #[test]
    fn indices_stay_dense(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = QueryState::new("text");
        for event in events {
            state.apply(event);
            assert_dense(&state)?;
        }
    }

    /// No collection ever drops below one row.
    #[test]
    fn collections_never_empty(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = QueryState::new("text");
        for event in events {
            state.apply(event);
            prop_assert!(state.include().len() >= 1);
            prop_assert!(state.exclude().len() >= 1);
        }
    }

    /// Removing from a single-row collection is a no-op.
    #[test]
    fn single_row_removal_is_rejected(kind in kind_strategy(), index in 0usize..4) {
        let mut state = QueryState::new("text");
        let before = state.clone();
        prop_assert_eq!(state.apply(Event::Remove { kind, index }), Outcome::Unchanged);
        prop_assert_eq!(state, before);
    }

    /// Removal only shifts rows after the removed one, preserving order.
    #[test]
    fn removal_preserves_relative_order(
        kind in kind_strategy(),
        extra in 1usize..8,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut state = QueryState::new("text");
        for _ in 0..extra {
            state.append(kind);
        }
        let keys: Vec<RowKey> = state.clauses(kind).iter().map(|c| c.key).collect();
        let index = pick.index(keys.len());

        prop_assert_eq!(state.remove_at(kind, index), Outcome::Changed);

        let mut expected = keys.clone();
        expected.remove(index);
        let after: Vec<RowKey> = state.clauses(kind).iter().map(|c| c.key).collect();
        prop_assert_eq!(after, expected);
    }

    /// Row keys are unique across both collections.
    #[test]
    fn keys_are_unique(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = QueryState::new("text");
        for event in events {
            state.apply(event);
        }
        let mut keys: Vec<RowKey> = state
            .include()
            .iter()
            .chain(state.exclude().iter())
            .map(|c| c.key)
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
    }

    /// The compiled query always matches a fresh compile of the registry.
    #[test]
    fn compiled_query_is_never_stale(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = QueryState::new("text");
        for event in events {
            state.apply(event);
            let fresh = seekform::compile(state.registry(), state.combinator());
            prop_assert_eq!(state.compiled_query(), fresh.as_str());
        }
    }

    /// Compiled text holds one term per filled row.
    #[test]
    fn one_term_per_filled_row(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = QueryState::new("text");
        for event in events {
            state.apply(event);
        }
        let filled_include = state.include().iter().filter(|c| c.is_filled()).count();
        let filled_exclude = state.exclude().iter().filter(|c| c.is_filled()).count();
        let query = state.compiled_query();

        // Generated fields and keywords contain no spaces, so whitespace
        // splitting recovers terms and joiners.
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let joiners = tokens.iter().filter(|t| **t == "AND" || **t == "OR").count();
        let negated = tokens.iter().filter(|t| t.starts_with('-')).count();

        prop_assert_eq!(negated, filled_exclude);
        prop_assert_eq!(joiners, filled_include.saturating_sub(1));
        prop_assert_eq!(tokens.len(), filled_include + joiners + filled_exclude);
    }

    /// The combinator never leaks into the exclude part.
    #[test]
    fn exclude_part_ignores_combinator(
        keywords in prop::collection::vec("[a-z]{1,6}", 1..6),
        combinator in combinator_strategy(),
    ) {
        let mut state = QueryState::new("tag").with_combinator(combinator);
        for (i, keyword) in keywords.iter().enumerate() {
            if i > 0 {
                state.append(ClauseKind::Exclude);
            }
            state.set_keyword(ClauseKind::Exclude, i, keyword.as_str());
        }
        let expected: Vec<String> = keywords.iter().map(|k| format!("-tag:{}", k)).collect();
        prop_assert_eq!(state.compiled_query(), expected.join(" "));
    }
}
