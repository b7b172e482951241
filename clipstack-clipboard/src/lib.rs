//! Session-scoped clipboard for structural edits.
//!
//! The [`Clipboard`] tracks pending operations (create, cut, copy, deep copy)
//! on hierarchically related records until the user pastes or abandons them.
//!
//! # Lifecycle
//!
//! - At the start of a request the host calls [`Clipboard::load_from`] with its
//!   [`SessionStore`]; a missing or corrupt snapshot simply yields an empty
//!   clipboard.
//! - User actions [`Clipboard::push`] or remove items. Items with the same
//!   [`clipstack_types::ClipboardKey`] replace each other.
//! - Renderers ask [`Clipboard::fetch`] with a [`Filter`] for the items
//!   relevant to a paste target, or [`Clipboard::has_identity`] to keep a
//!   record from being pasted into itself.
//! - At the end of the request [`Clipboard::save_to`] writes the whole
//!   contents back as one [`Snapshot`]; the last writer wins.

mod clipboard;
mod config;
mod error;
mod snapshot;
mod store;

pub use clipboard::Clipboard;
pub use config::ClipboardConfig;
pub use error::{ClipboardError, ClipboardResult};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

pub use clipstack_filter::Filter;
pub use clipstack_types::{Action, ClipboardKey, Identity, Item};
