//! Property-based tests for the predicate engine.
//!
//! - An empty filter accepts every item.
//! - The cached closure and the interpreted tree always agree.
//! - Chains evaluate left to right with no precedence.
//! - Embedding a filter as a sub-filter never changes what it accepts.

use clipstack_filter::Filter;
use clipstack_types::{Action, Identity, Item};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn identity_strategy() -> impl Strategy<Value = Identity> + Clone {
    (prop::sample::select(vec!["tl_page", "tl_article"]), 0u8..4)
        .prop_map(|(collection, key)| Identity::new(collection, key.to_string()))
}

fn item_strategy() -> impl Strategy<Value = Item> {
    let parent = prop::option::of(identity_strategy());
    prop_oneof![
        (identity_strategy(), parent.clone()).prop_map(|(m, p)| Item::cut(m, p)),
        (identity_strategy(), parent.clone()).prop_map(|(m, p)| Item::copy(m, p)),
        (identity_strategy(), parent.clone()).prop_map(|(m, p)| Item::deep_copy(m, p)),
        parent.clone().prop_map(Item::create),
        (prop::sample::select(vec!["tl_page", "tl_article"]), parent)
            .prop_map(|(prov, p)| Item::unsaved(prov, p)),
    ]
}

/// One builder step, applied with either conjunction.
#[derive(Debug, Clone)]
enum Step {
    ModelFrom(&'static str),
    ModelIs(Identity),
    ParentIs(Identity),
    ParentIn(Vec<Identity>),
    NoParent,
    ActionIs(Action),
    ActionNotIn(Vec<Action>),
}

impl Step {
    fn apply(&self, filter: Filter, or: bool) -> Filter {
        match (self, or) {
            (Step::ModelFrom(p), false) => filter.and_model_is_from_provider(*p),
            (Step::ModelFrom(p), true) => filter.or_model_is_from_provider(*p),
            (Step::ModelIs(id), false) => filter.and_model_is(id),
            (Step::ModelIs(id), true) => filter.or_model_is(id),
            (Step::ParentIs(id), false) => filter.and_parent_is(id),
            (Step::ParentIs(id), true) => filter.or_parent_is(id),
            (Step::ParentIn(ids), false) => filter.and_parent_is_in(ids),
            (Step::ParentIn(ids), true) => filter.or_parent_is_in(ids),
            (Step::NoParent, false) => filter.and_has_no_parent(),
            (Step::NoParent, true) => filter.or_has_no_parent(),
            (Step::ActionIs(a), false) => filter.and_action_is(*a),
            (Step::ActionIs(a), true) => filter.or_action_is(*a),
            (Step::ActionNotIn(a), false) => filter.and_action_is_not_in(a.iter().copied()),
            (Step::ActionNotIn(a), true) => filter.or_action_is_not_in(a.iter().copied()),
        }
    }

    /// Reference semantics, written against the item accessors directly.
    fn holds(&self, item: &Item) -> bool {
        match self {
            Step::ModelFrom(p) => item.data_provider() == Some(*p),
            Step::ModelIs(id) => item.model_id() == Some(id),
            Step::ParentIs(id) => item.parent_id() == Some(id),
            Step::ParentIn(ids) => item.parent_id().is_some_and(|parent| ids.contains(parent)),
            Step::NoParent => item.parent_id().is_none(),
            Step::ActionIs(a) => item.action() == *a,
            Step::ActionNotIn(a) => !a.contains(&item.action()),
        }
    }
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        prop::sample::select(vec!["tl_page", "tl_article"]).prop_map(Step::ModelFrom),
        identity_strategy().prop_map(Step::ModelIs),
        identity_strategy().prop_map(Step::ParentIs),
        prop::collection::vec(identity_strategy(), 0..3).prop_map(Step::ParentIn),
        Just(Step::NoParent),
        action_strategy().prop_map(Step::ActionIs),
        prop::collection::vec(action_strategy(), 0..3).prop_map(Step::ActionNotIn),
    ]
}

fn chain_strategy() -> impl Strategy<Value = Vec<(Step, bool)>> {
    prop::collection::vec((step_strategy(), any::<bool>()), 0..6)
}

fn build(chain: &[(Step, bool)]) -> Filter {
    chain
        .iter()
        .fold(Filter::new(), |filter, (step, or)| step.apply(filter, *or))
}

/// Folds the chain left to right, ignoring the first step's conjunction.
fn reference(chain: &[(Step, bool)], item: &Item) -> bool {
    let mut steps = chain.iter();
    let Some((first, _)) = steps.next() else {
        return true;
    };
    steps.fold(first.holds(item), |acc, (step, or)| {
        if *or { acc || step.holds(item) } else { acc && step.holds(item) }
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn empty_filter_accepts_all(item in item_strategy()) {
        prop_assert!(Filter::new().accepts(&item));
    }

    #[test]
    fn compiled_matches_interpreted(chain in chain_strategy(), item in item_strategy()) {
        let filter = build(&chain);
        let interpreted = filter.to_expr().evaluate(&item, filter.variables());
        prop_assert_eq!(filter.accepts(&item), interpreted);
    }

    #[test]
    fn chain_evaluates_left_to_right(chain in chain_strategy(), item in item_strategy()) {
        let filter = build(&chain);
        prop_assert_eq!(filter.accepts(&item), reference(&chain, &item));
    }

    #[test]
    fn sub_embedding_preserves_meaning(
        left in chain_strategy(),
        right in chain_strategy(),
        or in any::<bool>(),
        item in item_strategy(),
    ) {
        let expected_left = build(&left).accepts(&item);
        let expected_right = build(&right).accepts(&item);
        let combined = if or {
            Filter::new().and_sub(build(&left)).or_sub(build(&right))
        } else {
            Filter::new().and_sub(build(&left)).and_sub(build(&right))
        };
        let expected = if or {
            expected_left || expected_right
        } else {
            expected_left && expected_right
        };
        prop_assert_eq!(combined.accepts(&item), expected);
    }
}
