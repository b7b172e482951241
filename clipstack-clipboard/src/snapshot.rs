//! Serialized clipboard contents.
//!
//! A snapshot is one opaque value holding every pending item. It is written
//! and read as a whole, so concurrent sessions resolve by last writer wins.

use crate::error::{ClipboardError, ClipboardResult};
use clipstack_types::Item;
use serde::{Deserialize, Serialize};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Encoded clipboard contents as handed to a session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    items: Vec<&'a Item>,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    #[serde(default)]
    items: Vec<Item>,
}

impl Snapshot {
    /// Wraps an already encoded snapshot, e.g. one read back from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the encoded form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Encodes `items` as a versioned JSON document.
    pub fn encode<'a>(items: impl IntoIterator<Item = &'a Item>) -> ClipboardResult<Self> {
        let doc = SnapshotRef {
            version: SNAPSHOT_VERSION,
            items: items.into_iter().collect(),
        };
        Ok(Self(serde_json::to_string(&doc)?))
    }

    /// Decodes the items. Every item passes the same validation as
    /// [`Item::new`].
    pub fn decode(&self) -> ClipboardResult<Vec<Item>> {
        // Check the version first so a newer item layout is reported as such.
        let header: SnapshotHeader = serde_json::from_str(&self.0)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(ClipboardError::UnsupportedVersion {
                found: header.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        let doc: SnapshotOwned = serde_json::from_str(&self.0)?;
        Ok(doc.items)
    }
}
