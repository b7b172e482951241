use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The structural edit a clipboard item stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Insert a new record (it has no identity yet).
    Create,
    /// Move an existing record.
    Cut,
    /// Duplicate a record without its children.
    Copy,
    /// Duplicate a record together with all of its children.
    DeepCopy,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 4] = [Action::Create, Action::Cut, Action::Copy, Action::DeepCopy];

    /// Returns the canonical name (`create`, `cut`, `copy`, `deep_copy`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Cut => "cut",
            Action::Copy => "copy",
            Action::DeepCopy => "deep_copy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "cut" => Ok(Action::Cut),
            "copy" => Ok(Action::Copy),
            "deep_copy" | "deepcopy" | "deep-copy" => Ok(Action::DeepCopy),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}
