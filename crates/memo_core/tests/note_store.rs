use memo_core::db::{open_db_in_memory, DbError};
use memo_core::{
    KeyValueStore, MemorySettings, Note, NoteStore, SettingsNoteStore, SqliteSettingsRepository,
    StoreError, StoreResult, NOTES_SLOT_KEY,
};

/// Settings area whose backend rejects every read and write.
struct FailingSettings;

fn backend_error() -> StoreError {
    StoreError::Db(DbError::UnsupportedSchemaVersion {
        db_version: 2,
        latest_supported: 1,
    })
}

impl KeyValueStore for FailingSettings {
    fn get_value(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Err(backend_error())
    }

    fn set_value(&self, _key: &str, _value: &[u8]) -> StoreResult<()> {
        Err(backend_error())
    }
}

fn sample_notes() -> Vec<Note> {
    vec![
        Note::new("Buy milk and eggs", "Buy milk a", Some(3_000), Some(3_500)).unwrap(),
        Note::new("Call mom", "Call mom", Some(1_000), Some(1_000)).unwrap(),
        Note::new("Call mom", "Call mom", Some(1_000), Some(1_000)).unwrap(),
        Note::new("", "", Some(2_000), Some(9_000)).unwrap(),
    ]
}

#[test]
fn load_all_on_fresh_store_is_empty() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);

    assert!(store.load_all().is_empty());
}

#[test]
fn save_all_then_load_all_preserves_order_and_duplicates() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);
    let notes = sample_notes();

    store.save_all(&notes).unwrap();

    assert_eq!(store.load_all(), notes);
}

#[test]
fn save_all_empty_then_load_all_is_empty() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);
    store.save_all(&sample_notes()).unwrap();

    store.save_all(&[]).unwrap();

    assert!(settings.contains_key(NOTES_SLOT_KEY));
    assert!(store.load_all().is_empty());
}

#[test]
fn save_all_replaces_previous_collection() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);
    store.save_all(&sample_notes()).unwrap();

    let replacement = vec![Note::new("only", "only", Some(1), None).unwrap()];
    store.save_all(&replacement).unwrap();

    assert_eq!(store.load_all(), replacement);
}

#[test]
fn load_all_degrades_wrong_shape_to_empty() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);

    for blob in [
        &br#"{"body":"a","title":"a","timeCreated":1,"timeLastEdited":1}"#[..],
        &br#"[{"body":"a","title":"a","timeCreated":1,"timeLastEdited":1}]"#[..],
        &br#"{"version":1,"notes":{"body":"a"}}"#[..],
        &b"garbage"[..],
        &b""[..],
    ] {
        settings.set_value(NOTES_SLOT_KEY, blob).unwrap();
        assert!(store.load_all().is_empty());
    }
}

#[test]
fn load_all_degrades_collection_with_invalid_note_to_empty() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);
    let blob = br#"{"version":1,"notes":[
        {"body":"valid","title":"valid","timeCreated":1,"timeLastEdited":1},
        {"body":"no edit time","title":"bad","timeCreated":1}
    ]}"#;
    settings.set_value(NOTES_SLOT_KEY, blob).unwrap();

    assert!(store.load_all().is_empty());
}

#[test]
fn load_all_degrades_newer_archive_version_to_empty() {
    let settings = MemorySettings::new();
    let store = SettingsNoteStore::new(&settings);
    settings
        .set_value(NOTES_SLOT_KEY, br#"{"version":2,"notes":[]}"#)
        .unwrap();

    assert!(store.load_all().is_empty());
}

#[test]
fn sqlite_backed_store_round_trips_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SettingsNoteStore::new(SqliteSettingsRepository::new(&conn));
    let notes = sample_notes();

    assert!(store.load_all().is_empty());
    store.save_all(&notes).unwrap();
    assert_eq!(store.load_all(), notes);

    let slot_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM settings WHERE key = ?1;",
            [NOTES_SLOT_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(slot_rows, 1);
}

#[test]
fn sqlite_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.sqlite3");
    let notes = sample_notes();

    {
        let conn = memo_core::db::open_db(&path).unwrap();
        let store = SettingsNoteStore::new(SqliteSettingsRepository::new(&conn));
        store.save_all(&notes).unwrap();
    }

    let conn = memo_core::db::open_db(&path).unwrap();
    let store = SettingsNoteStore::new(SqliteSettingsRepository::new(&conn));
    assert_eq!(store.load_all(), notes);
}

#[test]
fn load_all_degrades_backend_read_failure_to_empty() {
    let store = SettingsNoteStore::new(FailingSettings);

    assert_eq!(store.load_all(), Vec::<Note>::new());
}

#[test]
fn save_all_returns_backend_write_failure() {
    let store = SettingsNoteStore::new(FailingSettings);

    let err = store.save_all(&sample_notes()).unwrap_err();
    assert!(matches!(err, StoreError::Db(_)), "unexpected error: {err}");
}
