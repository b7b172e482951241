use crate::compile::{Predicate, compile};
use crate::expr::{Atom, Conjunction, Expr, Fragment, Rendered};
use crate::value::{Slot, Value};
use clipstack_types::{Action, Identity, Item};
use std::cell::OnceCell;
use std::fmt;
use tracing::debug;

/// A composable boolean query over clipboard items.
///
/// Every builder call appends one operand; when the filter already holds an
/// operand, the chosen conjunction goes in front of the new one. The chain
/// evaluates strictly in authored order with no precedence between `and` and
/// `or`; use [`Filter::and_sub`] / [`Filter::or_sub`] to group.
///
/// The filter compiles itself on the first [`Filter::accepts`] call and caches
/// the compiled predicate until the next builder call. A filter without any
/// operand accepts every item.
///
/// `*_is_in` with an empty list matches nothing; `*_is_not_in` with an empty
/// list matches everything.
pub struct Filter {
    fragments: Vec<Fragment>,
    variables: Vec<Value>,
    compiled: OnceCell<Predicate>,
}

impl Filter {
    /// Creates an empty filter, which accepts every item.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fragments: Vec::new(),
            variables: Vec::new(),
            compiled: OnceCell::new(),
        }
    }

    /// Returns true if no operand has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the variable table the expression's slots point into.
    #[must_use]
    pub fn variables(&self) -> &[Value] {
        &self.variables
    }

    /// Returns the authored fragments.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Folds the authored fragments into an expression tree.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        Expr::fold(&self.fragments, Conjunction::And)
    }

    /// Renders the expression with `$n` placeholders for variable slots.
    #[must_use]
    pub fn expression(&self) -> String {
        self.to_string()
    }

    /// Returns true if the compiled predicate is cached.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    /// Compiles the expression now instead of on the next [`Filter::accepts`].
    pub fn compile(&self) {
        self.predicate();
    }

    /// Tests `item` against the filter.
    #[must_use]
    pub fn accepts(&self, item: &Item) -> bool {
        (self.predicate())(item, &self.variables)
    }

    fn predicate(&self) -> &Predicate {
        self.compiled.get_or_init(|| {
            debug!("Compiling filter: {}", self);
            compile(&self.to_expr())
        })
    }

    // ── Building blocks ──────────────────────────────────────────

    fn bind(&mut self, value: Value) -> Slot {
        self.variables.push(value);
        self.variables.len() - 1
    }

    fn push(mut self, conjunction: Conjunction, fragment: Fragment) -> Self {
        self.compiled.take();
        if !self.fragments.is_empty() {
            self.fragments.push(Fragment::Conjunction(conjunction));
        }
        self.fragments.push(fragment);
        self
    }

    fn atom(mut self, conjunction: Conjunction, make: fn(Slot) -> Atom, value: Value) -> Self {
        let slot = self.bind(value);
        self.push(conjunction, Fragment::Atom(make(slot)))
    }

    fn group(
        mut self,
        conjunction: Conjunction,
        joiner: Conjunction,
        make: fn(Slot) -> Atom,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut fragments = Vec::new();
        for value in values {
            if !fragments.is_empty() {
                fragments.push(Fragment::Conjunction(joiner));
            }
            let slot = self.bind(value);
            fragments.push(Fragment::Atom(make(slot)));
        }
        self.push(conjunction, Fragment::Group { joiner, fragments })
    }

    fn sub(mut self, conjunction: Conjunction, other: Filter) -> Self {
        // The child's table moves into a single slot; its own slot numbers
        // stay valid relative to that nested table.
        let Filter {
            fragments, variables, ..
        } = other;
        let slot = self.bind(Value::Table(variables));
        self.push(conjunction, Fragment::Sub { slot, fragments })
    }

    fn provider(name: impl Into<String>) -> Value {
        Value::Provider(name.into())
    }

    fn identities<'a>(ids: impl IntoIterator<Item = &'a Identity>) -> impl Iterator<Item = Value> {
        ids.into_iter().map(|id| Value::Identity(id.clone()))
    }

    // ── Model provider ───────────────────────────────────────────

    /// The item's record belongs (or will belong) to provider `name`.
    #[must_use]
    pub fn and_model_is_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::And, Atom::ModelFromProvider, Self::provider(name))
    }

    #[must_use]
    pub fn or_model_is_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::Or, Atom::ModelFromProvider, Self::provider(name))
    }

    #[must_use]
    pub fn and_model_is_not_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::And, Atom::ModelNotFromProvider, Self::provider(name))
    }

    #[must_use]
    pub fn or_model_is_not_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::Or, Atom::ModelNotFromProvider, Self::provider(name))
    }

    // ── Model identity ───────────────────────────────────────────

    /// The item operates on record `id`. Never true for creates.
    #[must_use]
    pub fn and_model_is(self, id: &Identity) -> Self {
        self.atom(Conjunction::And, Atom::ModelIs, Value::Identity(id.clone()))
    }

    #[must_use]
    pub fn or_model_is(self, id: &Identity) -> Self {
        self.atom(Conjunction::Or, Atom::ModelIs, Value::Identity(id.clone()))
    }

    #[must_use]
    pub fn and_model_is_not(self, id: &Identity) -> Self {
        self.atom(Conjunction::And, Atom::ModelIsNot, Value::Identity(id.clone()))
    }

    #[must_use]
    pub fn or_model_is_not(self, id: &Identity) -> Self {
        self.atom(Conjunction::Or, Atom::ModelIsNot, Value::Identity(id.clone()))
    }

    // ── Parent provider ──────────────────────────────────────────

    /// The item has a parent and it belongs to provider `name`.
    #[must_use]
    pub fn and_parent_is_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::And, Atom::ParentFromProvider, Self::provider(name))
    }

    #[must_use]
    pub fn or_parent_is_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::Or, Atom::ParentFromProvider, Self::provider(name))
    }

    /// Negation of [`Filter::and_parent_is_from_provider`]; parentless items match.
    #[must_use]
    pub fn and_parent_is_not_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::And, Atom::ParentNotFromProvider, Self::provider(name))
    }

    #[must_use]
    pub fn or_parent_is_not_from_provider(self, name: impl Into<String>) -> Self {
        self.atom(Conjunction::Or, Atom::ParentNotFromProvider, Self::provider(name))
    }

    // ── Parent identity ──────────────────────────────────────────

    #[must_use]
    pub fn and_has_no_parent(self) -> Self {
        self.push(Conjunction::And, Fragment::Atom(Atom::HasNoParent))
    }

    #[must_use]
    pub fn or_has_no_parent(self) -> Self {
        self.push(Conjunction::Or, Fragment::Atom(Atom::HasNoParent))
    }

    #[must_use]
    pub fn and_parent_is(self, id: &Identity) -> Self {
        self.atom(Conjunction::And, Atom::ParentIs, Value::Identity(id.clone()))
    }

    #[must_use]
    pub fn or_parent_is(self, id: &Identity) -> Self {
        self.atom(Conjunction::Or, Atom::ParentIs, Value::Identity(id.clone()))
    }

    #[must_use]
    pub fn and_parent_is_not(self, id: &Identity) -> Self {
        self.atom(Conjunction::And, Atom::ParentIsNot, Value::Identity(id.clone()))
    }

    #[must_use]
    pub fn or_parent_is_not(self, id: &Identity) -> Self {
        self.atom(Conjunction::Or, Atom::ParentIsNot, Value::Identity(id.clone()))
    }

    /// The item's parent is one of `ids`. An empty list matches nothing.
    #[must_use]
    pub fn and_parent_is_in<'a>(self, ids: impl IntoIterator<Item = &'a Identity>) -> Self {
        self.group(Conjunction::And, Conjunction::Or, Atom::ParentIs, Self::identities(ids))
    }

    #[must_use]
    pub fn or_parent_is_in<'a>(self, ids: impl IntoIterator<Item = &'a Identity>) -> Self {
        self.group(Conjunction::Or, Conjunction::Or, Atom::ParentIs, Self::identities(ids))
    }

    /// The item's parent is none of `ids`. An empty list matches everything.
    #[must_use]
    pub fn and_parent_is_not_in<'a>(self, ids: impl IntoIterator<Item = &'a Identity>) -> Self {
        self.group(Conjunction::And, Conjunction::And, Atom::ParentIsNot, Self::identities(ids))
    }

    #[must_use]
    pub fn or_parent_is_not_in<'a>(self, ids: impl IntoIterator<Item = &'a Identity>) -> Self {
        self.group(Conjunction::Or, Conjunction::And, Atom::ParentIsNot, Self::identities(ids))
    }

    // ── Action ───────────────────────────────────────────────────

    #[must_use]
    pub fn and_action_is(self, action: Action) -> Self {
        self.atom(Conjunction::And, Atom::ActionIs, Value::Action(action))
    }

    #[must_use]
    pub fn or_action_is(self, action: Action) -> Self {
        self.atom(Conjunction::Or, Atom::ActionIs, Value::Action(action))
    }

    #[must_use]
    pub fn and_action_is_not(self, action: Action) -> Self {
        self.atom(Conjunction::And, Atom::ActionIsNot, Value::Action(action))
    }

    #[must_use]
    pub fn or_action_is_not(self, action: Action) -> Self {
        self.atom(Conjunction::Or, Atom::ActionIsNot, Value::Action(action))
    }

    /// The item's action is one of `actions`. An empty list matches nothing.
    #[must_use]
    pub fn and_action_is_in(self, actions: impl IntoIterator<Item = Action>) -> Self {
        let values = actions.into_iter().map(Value::Action);
        self.group(Conjunction::And, Conjunction::Or, Atom::ActionIs, values)
    }

    #[must_use]
    pub fn or_action_is_in(self, actions: impl IntoIterator<Item = Action>) -> Self {
        let values = actions.into_iter().map(Value::Action);
        self.group(Conjunction::Or, Conjunction::Or, Atom::ActionIs, values)
    }

    /// The item's action is none of `actions`. An empty list matches everything.
    #[must_use]
    pub fn and_action_is_not_in(self, actions: impl IntoIterator<Item = Action>) -> Self {
        let values = actions.into_iter().map(Value::Action);
        self.group(Conjunction::And, Conjunction::And, Atom::ActionIsNot, values)
    }

    #[must_use]
    pub fn or_action_is_not_in(self, actions: impl IntoIterator<Item = Action>) -> Self {
        let values = actions.into_iter().map(Value::Action);
        self.group(Conjunction::Or, Conjunction::And, Atom::ActionIsNot, values)
    }

    // ── Grouping ─────────────────────────────────────────────────

    /// Embeds `other` as one parenthesized operand joined with `and`.
    #[must_use]
    pub fn and_sub(self, other: Filter) -> Self {
        self.sub(Conjunction::And, other)
    }

    /// Embeds `other` as one parenthesized operand joined with `or`.
    #[must_use]
    pub fn or_sub(self, other: Filter) -> Self {
        self.sub(Conjunction::Or, other)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Filter {
    fn clone(&self) -> Self {
        Self {
            fragments: self.fragments.clone(),
            variables: self.variables.clone(),
            compiled: OnceCell::new(),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("expression", &self.expression())
            .field("variables", &self.variables)
            .field("compiled", &self.is_compiled())
            .finish()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = Rendered {
            fragments: &self.fragments,
            empty: Conjunction::And,
        };
        fmt::Display::fmt(&rendered, f)
    }
}
