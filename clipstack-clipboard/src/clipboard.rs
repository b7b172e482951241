use crate::config::ClipboardConfig;
use crate::error::ClipboardResult;
use crate::snapshot::Snapshot;
use crate::store::SessionStore;
use clipstack_filter::Filter;
use clipstack_types::{ClipboardKey, Identity, Item};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Registry of the pending operations of one session.
///
/// Items are keyed by [`Item::clipboard_key`]; pushing an item whose key is
/// already present replaces the stored one. Iteration and [`Clipboard::fetch`]
/// follow key order.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: BTreeMap<ClipboardKey, Item>,
    config: ClipboardConfig,
}

impl Clipboard {
    /// Creates an empty clipboard with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty clipboard persisting under `config`'s store key.
    #[must_use]
    pub fn with_config(config: ClipboardConfig) -> Self {
        Self {
            items: BTreeMap::new(),
            config,
        }
    }

    /// Creates a clipboard and fills it from `store`.
    pub fn load<S: SessionStore + ?Sized>(store: &S, config: ClipboardConfig) -> Self {
        let mut clipboard = Self::with_config(config);
        clipboard.load_from(store);
        clipboard
    }

    #[must_use]
    pub fn config(&self) -> &ClipboardConfig {
        &self.config
    }

    // ── Mutation ─────────────────────────────────────────────────

    /// Adds `item`, replacing any item with the same key.
    ///
    /// Returns the replaced item.
    pub fn push(&mut self, item: Item) -> Option<Item> {
        let key = item.clipboard_key();
        debug!("Pushing clipboard item {}", key);
        self.items.insert(key, item)
    }

    /// Removes the item stored under `item`'s key, but only if it is equal
    /// to `item`.
    pub fn remove(&mut self, item: &Item) -> bool {
        let key = item.clipboard_key();
        if self.items.get(&key) != Some(item) {
            return false;
        }
        debug!("Removing clipboard item {}", key);
        self.items.remove(&key).is_some()
    }

    /// Removes whatever is stored under `key`.
    pub fn remove_by_key(&mut self, key: &ClipboardKey) -> Option<Item> {
        self.items.remove(key)
    }

    /// Removes every item operating on record `id` and returns how many
    /// were removed.
    ///
    /// Only model ids are matched; items that merely have `id` as parent
    /// stay.
    pub fn remove_by_identity(&mut self, id: &Identity) -> usize {
        let before = self.items.len();
        self.items.retain(|_, item| item.model_id() != Some(id));
        let removed = before - self.items.len();
        if removed > 0 {
            debug!("Removed {} clipboard item(s) for {}", removed, id);
        }
        removed
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Returns true if an item equal to `item` is stored.
    #[must_use]
    pub fn has(&self, item: &Item) -> bool {
        self.items.get(&item.clipboard_key()) == Some(item)
    }

    /// Returns true if any item operates on record `id`.
    #[must_use]
    pub fn has_identity(&self, id: &Identity) -> bool {
        self.items.values().any(|item| item.model_id() == Some(id))
    }

    #[must_use]
    pub fn has_key(&self, key: &ClipboardKey) -> bool {
        self.items.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &ClipboardKey) -> Option<&Item> {
        self.items.get(key)
    }

    /// Returns every item accepted by `filter`.
    #[must_use]
    pub fn fetch(&self, filter: &Filter) -> Vec<&Item> {
        self.items.values().filter(|item| filter.accepts(item)).collect()
    }

    /// Returns true if no item is accepted by `filter`.
    #[must_use]
    pub fn is_empty(&self, filter: &Filter) -> bool {
        !self.is_not_empty(filter)
    }

    /// Returns true if at least one item is accepted by `filter`.
    #[must_use]
    pub fn is_not_empty(&self, filter: &Filter) -> bool {
        self.items.values().any(|item| filter.accepts(item))
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    // ── Persistence ──────────────────────────────────────────────

    /// Replaces the contents with the snapshot in `store`.
    ///
    /// A missing or unreadable snapshot leaves the clipboard empty.
    pub fn load_from<S: SessionStore + ?Sized>(&mut self, store: &S) {
        self.items.clear();

        let key = self.config.store_key();
        let Some(snapshot) = store.get(&key) else {
            debug!("No clipboard snapshot under {}", key);
            return;
        };

        match snapshot.decode() {
            Ok(items) => {
                for item in items {
                    self.items.insert(item.clipboard_key(), item);
                }
                debug!("Loaded {} clipboard item(s) from {}", self.items.len(), key);
            }
            Err(e) => {
                warn!("Discarding unreadable clipboard snapshot under {}: {}", key, e);
            }
        }
    }

    /// Writes the full contents to `store` as one snapshot.
    pub fn save_to<S: SessionStore + ?Sized>(&self, store: &mut S) -> ClipboardResult<()> {
        let key = self.config.store_key();
        let snapshot = Snapshot::encode(self.items.values())?;
        store.set(&key, snapshot)?;
        debug!("Saved {} clipboard item(s) to {}", self.items.len(), key);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Clipboard {
    type Item = &'a Item;
    type IntoIter = std::collections::btree_map::Values<'a, ClipboardKey, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}
