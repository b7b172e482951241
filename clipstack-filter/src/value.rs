use clipstack_types::{Action, Identity};
use std::fmt;

/// Index into a filter's variable table.
pub type Slot = usize;

/// A runtime value bound into a filter's variable table.
///
/// Atoms never embed the values they compare against; they reference a
/// slot instead. A sub-filter's whole table is stored as one
/// [`Value::Table`] slot of its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Identity(Identity),
    Provider(String),
    Action(Action),
    Table(Vec<Value>),
}

impl Value {
    #[must_use]
    pub fn as_identity(&self) -> Option<&Identity> {
        match self {
            Value::Identity(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_provider(&self) -> Option<&str> {
        match self {
            Value::Provider(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_action(&self) -> Option<Action> {
        match self {
            Value::Action(action) => Some(*action),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&[Value]> {
        match self {
            Value::Table(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Identity(id) => write!(f, "{id}"),
            Value::Provider(name) => write!(f, "'{name}'"),
            Value::Action(action) => write!(f, "{action}"),
            Value::Table(values) => write!(f, "[{} values]", values.len()),
        }
    }
}

pub(crate) fn identity(vars: &[Value], slot: Slot) -> Option<&Identity> {
    vars.get(slot).and_then(Value::as_identity)
}

pub(crate) fn provider(vars: &[Value], slot: Slot) -> Option<&str> {
    vars.get(slot).and_then(Value::as_provider)
}

pub(crate) fn action(vars: &[Value], slot: Slot) -> Option<Action> {
    vars.get(slot).and_then(Value::as_action)
}

pub(crate) fn table(vars: &[Value], slot: Slot) -> Option<&[Value]> {
    vars.get(slot).and_then(Value::as_table)
}
