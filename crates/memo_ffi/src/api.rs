//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose note list/create/edit use-cases to Dart via FRB.
//! - Play the editor screen's role: open a session, forward text, save.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Errors are returned as UTF-8 messages inside response envelopes.

use log::warn;
use memo_core::db::open_db;
use memo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditorSession, Note, NoteService, SettingsNoteStore, SqliteSettingsRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "memo.sqlite3";
const DB_PATH_ENV: &str = "MEMO_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type SqliteNoteService<'conn> = NoteService<SettingsNoteStore<SqliteSettingsRepository<'conn>>>;

/// Minimal health-check API.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
/// - Idempotent for the same pair; returns an empty string on success and
///   an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the settings database path used by every note call.
///
/// Must be called before the first note call; afterwards only the same
/// path is accepted. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }

    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Note projection handed to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub title: String,
    pub body: String,
    /// Creation time in epoch milliseconds; identifies the note in edits.
    pub time_created: i64,
    pub time_last_edited: i64,
}

impl From<&Note> for NoteItem {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            body: note.body().to_string(),
            time_created: note.time_created(),
            time_last_edited: note.time_last_edited(),
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    /// Notes in stored order; empty on failure.
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Create/edit response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    pub note: Option<NoteItem>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note: &Note) -> Self {
        Self {
            ok: true,
            note: Some(NoteItem::from(note)),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

/// Lists all persisted notes.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesResponse {
    match with_note_service(|service| {
        Ok(service.notes().iter().map(NoteItem::from).collect::<Vec<_>>())
    }) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Loaded {} note(s).", items.len())
            };
            NotesResponse { items, message }
        }
        Err(err) => NotesResponse {
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Creates a note with a derived title and puts it first in the list.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(body: String) -> NoteActionResponse {
    match with_note_service(|service| service.create_note(body).map_err(|err| err.to_string())) {
        Ok(note) => NoteActionResponse::success("Note created.", &note),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Replaces the body of the note created at `time_created` and saves the
/// whole collection.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit(time_created: i64, body: String) -> NoteActionResponse {
    match with_note_service(|service| edit_note(service, time_created, body)) {
        Ok(note) => NoteActionResponse::success("Note saved.", &note),
        Err(err) => NoteActionResponse::failure(format!("note_edit failed: {err}")),
    }
}

fn edit_note(
    service: &mut SqliteNoteService<'_>,
    time_created: i64,
    body: String,
) -> Result<Note, String> {
    let note = service.note_for_edit(time_created).ok();
    let mut save_error: Option<String> = None;

    let edited = {
        let mut session = EditorSession::open(note)
            .map_err(|err| err.to_string())?
            .with_observer(|edited: &Note| {
                if let Err(err) = service.apply_edit(edited) {
                    save_error = Some(err.to_string());
                }
            });
        session.text_changed(body);
        session.into_note()
    };

    match save_error {
        Some(err) => Err(err),
        None => Ok(edited),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_note_service<T>(
    f: impl FnOnce(&mut SqliteNoteService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("db open failed: {err}")
    })?;
    let mut service = NoteService::load(SettingsNoteStore::new(SqliteSettingsRepository::new(
        &conn,
    )));
    f(&mut service)
}
