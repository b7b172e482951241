use clipstack_clipboard::{
    Clipboard, ClipboardConfig, ClipboardError, FileSessionStore, Identity, Item,
    MemorySessionStore, SessionStore, Snapshot,
};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ── MemorySessionStore ───────────────────────────────────────────

#[test]
fn memory_store_get_missing() {
    let store = MemorySessionStore::new();
    assert!(store.get("CLIPBOARD").is_none());
    assert!(store.is_empty());
}

#[test]
fn memory_store_set_and_get() {
    let mut store = MemorySessionStore::new();
    store.set("k", Snapshot::from_raw("one")).unwrap();
    store.set("k", Snapshot::from_raw("two")).unwrap();
    assert_eq!(store.get("k"), Some(Snapshot::from_raw("two")));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_remove() {
    let mut store = MemorySessionStore::new();
    store.set("k", Snapshot::from_raw("one")).unwrap();
    assert_eq!(store.remove("k"), Some(Snapshot::from_raw("one")));
    assert!(store.get("k").is_none());
}

// ── FileSessionStore ─────────────────────────────────────────────

#[test]
fn file_store_creates_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("sessions").join("abc");
    let store = FileSessionStore::new(&nested).unwrap();
    assert!(nested.is_dir());
    assert_eq!(store.dir(), nested.as_path());
}

#[test]
fn file_store_get_missing() {
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path()).unwrap();
    assert!(store.get("CLIPBOARD").is_none());
}

#[test]
fn file_store_set_and_get() {
    let dir = TempDir::new().unwrap();
    let mut store = FileSessionStore::new(dir.path()).unwrap();
    store.set("CLIPBOARD", Snapshot::from_raw("payload")).unwrap();
    assert_eq!(store.get("CLIPBOARD"), Some(Snapshot::from_raw("payload")));
    assert!(store.path_for("CLIPBOARD").exists());
    assert!(!store.path_for("CLIPBOARD").with_extension("json.tmp").exists());
}

#[test]
fn file_store_escapes_keys() {
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path()).unwrap();
    let path = store.path_for("../CLIPBOARD/x y");
    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(path.file_name().unwrap(), "..%2FCLIPBOARD%2Fx%20y.json");
}

#[test]
fn file_store_keys_never_share_a_file() {
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path()).unwrap();
    let keys = [
        "CLIPBOARD.tl_page",
        "CLIPBOARD.tl/page",
        "CLIPBOARD.tl page",
        "CLIPBOARD.tl%2Fpage",
        "CLIPBOARD.tl%page",
    ];
    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(store.path_for(a), store.path_for(b), "{a} vs {b}");
        }
    }
}

#[test]
fn scopes_differing_in_escaped_characters_stay_separate() {
    let dir = TempDir::new().unwrap();
    let mut store = FileSessionStore::new(dir.path()).unwrap();

    let mut slashed = Clipboard::with_config(ClipboardConfig::scoped("tl/page"));
    slashed.push(Item::cut(Identity::new("tl_page", "1"), None));
    slashed.save_to(&mut store).unwrap();

    let underscored = Clipboard::load(&store, ClipboardConfig::scoped("tl_page"));
    assert_eq!(underscored.len(), 0);

    let reloaded = Clipboard::load(&store, ClipboardConfig::scoped("tl/page"));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn save_to_reports_write_failure() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("session");
    let mut store = FileSessionStore::new(&root).unwrap();
    std::fs::remove_dir_all(&root).unwrap();

    let mut clipboard = Clipboard::new();
    clipboard.push(Item::cut(Identity::new("tl_page", "1"), None));
    let err = clipboard.save_to(&mut store).unwrap_err();
    assert!(matches!(err, ClipboardError::Io(_)));
    assert!(store.get("CLIPBOARD").is_none());
}

#[test]
fn memory_store_set_never_fails() {
    let mut store = MemorySessionStore::new();
    assert!(store.set("k", Snapshot::from_raw("one")).is_ok());
}

#[test]
fn clipboard_roundtrips_through_file_store() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let mut store = FileSessionStore::new(dir.path()).unwrap();

    let mut clipboard = Clipboard::with_config(ClipboardConfig::scoped("tl_page"));
    clipboard.push(Item::cut(Identity::new("tl_page", "1"), None));
    clipboard.push(Item::unsaved("tl_page", Some(Identity::new("tl_page", "1"))));
    clipboard.save_to(&mut store).unwrap();

    // A new store instance sees what the previous turn wrote.
    let store = FileSessionStore::new(dir.path()).unwrap();
    let restored = Clipboard::load(&store, ClipboardConfig::scoped("tl_page"));
    assert_eq!(restored.len(), 2);
    assert!(restored.has_identity(&Identity::new("tl_page", "1")));
}

#[test]
fn corrupt_file_yields_empty_clipboard() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path()).unwrap();
    std::fs::write(store.path_for("CLIPBOARD"), "garbage").unwrap();

    let clipboard = Clipboard::load(&store, ClipboardConfig::default());
    assert_eq!(clipboard.len(), 0);
}

#[test]
fn works_through_trait_object() {
    let mut store: Box<dyn SessionStore> = Box::new(MemorySessionStore::new());
    let mut clipboard = Clipboard::new();
    clipboard.push(Item::copy(Identity::new("tl_page", "3"), None));
    clipboard.save_to(&mut *store).unwrap();

    let mut restored = Clipboard::new();
    restored.load_from(&*store);
    assert_eq!(restored.len(), 1);
}
