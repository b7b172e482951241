//! Core type definitions for clipstack.
//!
//! This crate defines the value types every other clipstack crate builds on:
//! - [`Identity`]: an opaque record identifier scoped to a data provider
//! - [`Action`]: the structural edit an item stands for
//! - [`Item`]: one pending operation (create, cut, copy, deep copy)
//! - [`ClipboardKey`]: the registry key derived from an item
//!
//! How an identity maps to an actual record is up to the host's data layer;
//! nothing in here fetches or renders records.

mod action;
mod ids;
mod item;

pub use action::Action;
pub use ids::Identity;
pub use item::{ClipboardKey, Item};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing identities or items.
///
/// All of them happen at construction time: a value that made it past its
/// constructor is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("a {action} item requires a model id")]
    MissingModelId { action: Action },

    #[error("a create item must not carry a model id")]
    UnexpectedModelId,

    #[error("a {action} item must not carry a target provider")]
    UnexpectedProvider { action: Action },

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}
