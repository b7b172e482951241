//! Pending clipboard items.
//!
//! An item records one structural edit the user has started but not yet
//! finished: "cut record X", "copy record Y with children", "create a new
//! record under Z". Items are immutable values; a changed intent is a new
//! item that replaces the old one in the clipboard.

use crate::{Action, Error, Identity, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One pending operation tracked by the clipboard.
///
/// Invariant: `model_id` is `None` exactly when `action` is [`Action::Create`].
/// Only creates carry a `provider`, and only when the collection of the
/// future record is already known (an *unsaved* create).
///
/// Equality is structural: same action, same parent (or both parentless),
/// same model id (or both without one), and for creates the same target
/// provider. Deriving over all fields gives exactly that rule because
/// `provider` is never set when a model id is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawItem", into = "RawItem")]
pub struct Item {
    action: Action,
    parent_id: Option<Identity>,
    model_id: Option<Identity>,
    provider: Option<String>,
}

impl Item {
    /// Creates an item, enforcing the model id invariant.
    pub fn new(
        action: Action,
        parent_id: Option<Identity>,
        model_id: Option<Identity>,
    ) -> Result<Self> {
        match (action, &model_id) {
            (Action::Create, Some(_)) => return Err(Error::UnexpectedModelId),
            (Action::Cut | Action::Copy | Action::DeepCopy, None) => {
                return Err(Error::MissingModelId { action });
            }
            _ => {}
        }

        Ok(Self {
            action,
            parent_id,
            model_id,
            provider: None,
        })
    }

    /// Creates an item from an action name such as `"cut"` or `"deep_copy"`.
    pub fn from_parts(
        action: &str,
        parent_id: Option<Identity>,
        model_id: Option<Identity>,
    ) -> Result<Self> {
        Self::new(action.parse()?, parent_id, model_id)
    }

    /// Creates an unsaved create item targeting `provider`.
    ///
    /// The future record has no identity yet, so the item is keyed by
    /// provider and parent instead.
    #[must_use]
    pub fn unsaved(provider: impl Into<String>, parent_id: Option<Identity>) -> Self {
        Self {
            action: Action::Create,
            parent_id,
            model_id: None,
            provider: Some(provider.into()),
        }
    }

    /// Creates a create item whose target provider is not known.
    #[must_use]
    pub fn create(parent_id: Option<Identity>) -> Self {
        Self {
            action: Action::Create,
            parent_id,
            model_id: None,
            provider: None,
        }
    }

    /// Creates a cut item for `model_id`.
    #[must_use]
    pub fn cut(model_id: Identity, parent_id: Option<Identity>) -> Self {
        Self::with_model(Action::Cut, model_id, parent_id)
    }

    /// Creates a copy item for `model_id`.
    #[must_use]
    pub fn copy(model_id: Identity, parent_id: Option<Identity>) -> Self {
        Self::with_model(Action::Copy, model_id, parent_id)
    }

    /// Creates a deep copy item for `model_id`.
    #[must_use]
    pub fn deep_copy(model_id: Identity, parent_id: Option<Identity>) -> Self {
        Self::with_model(Action::DeepCopy, model_id, parent_id)
    }

    fn with_model(action: Action, model_id: Identity, parent_id: Option<Identity>) -> Self {
        Self {
            action,
            parent_id,
            model_id: Some(model_id),
            provider: None,
        }
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<&Identity> {
        self.parent_id.as_ref()
    }

    /// Returns the identity of the record this item operates on.
    ///
    /// Always `None` for creates: the record does not exist yet.
    #[must_use]
    pub fn model_id(&self) -> Option<&Identity> {
        self.model_id.as_ref()
    }

    /// Returns the target provider of an unsaved create.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the provider the item's record belongs (or will belong) to.
    ///
    /// This is the model id's collection for existing records and the
    /// target provider for unsaved creates.
    #[must_use]
    pub fn data_provider(&self) -> Option<&str> {
        self.model_id
            .as_ref()
            .map(Identity::collection)
            .or(self.provider.as_deref())
    }

    #[must_use]
    pub fn is_create(&self) -> bool {
        self.action == Action::Create
    }

    #[must_use]
    pub fn is_cut(&self) -> bool {
        self.action == Action::Cut
    }

    #[must_use]
    pub fn is_copy(&self) -> bool {
        self.action == Action::Copy
    }

    #[must_use]
    pub fn is_deep_copy(&self) -> bool {
        self.action == Action::DeepCopy
    }

    /// Returns true for a create whose target provider is known.
    #[must_use]
    pub fn is_unsaved(&self) -> bool {
        self.provider.is_some()
    }

    /// Derives the registry key for this item.
    ///
    /// Existing records are keyed by `(action, model_id)`, creates by
    /// `(provider, parent_id)`. At most one pending action per record and
    /// one pending create per parent can therefore coexist.
    #[must_use]
    pub fn clipboard_key(&self) -> ClipboardKey {
        match &self.model_id {
            Some(model_id) => ClipboardKey::Model {
                action: self.action,
                model_id: model_id.clone(),
            },
            None => ClipboardKey::Create {
                provider: self.provider.clone(),
                parent_id: self.parent_id.clone(),
            },
        }
    }
}

/// Key under which an item is stored in the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClipboardKey {
    /// An action on an existing record.
    Model { action: Action, model_id: Identity },
    /// A create; a `None` parent stands for "top level".
    Create {
        provider: Option<String>,
        parent_id: Option<Identity>,
    },
}

impl fmt::Display for ClipboardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardKey::Model { action, model_id } => write!(f, "{action}/{model_id}"),
            ClipboardKey::Create { provider, parent_id } => {
                write!(f, "{}/{}/", Action::Create, provider.as_deref().unwrap_or(""))?;
                match parent_id {
                    Some(parent) => write!(f, "{parent}"),
                    None => f.write_str("null"),
                }
            }
        }
    }
}

/// Wire form of an item; decoding goes through the same validation as
/// [`Item::new`].
#[derive(Serialize, Deserialize)]
struct RawItem {
    action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model_id: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
}

impl TryFrom<RawItem> for Item {
    type Error = Error;

    fn try_from(raw: RawItem) -> Result<Self> {
        let item = Item::new(raw.action, raw.parent_id, raw.model_id)?;
        match raw.provider {
            None => Ok(item),
            Some(provider) if item.is_create() => Ok(Item {
                provider: Some(provider),
                ..item
            }),
            Some(_) => Err(Error::UnexpectedProvider { action: raw.action }),
        }
    }
}

impl From<Item> for RawItem {
    fn from(item: Item) -> Self {
        Self {
            action: item.action,
            parent_id: item.parent_id,
            model_id: item.model_id,
            provider: item.provider,
        }
    }
}
