//! Core domain logic for memo.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::archive::{ArchiveError, ARCHIVE_VERSION};
pub use model::note::{derive_title, now_epoch_ms, Note, NoteValidationError};
pub use repo::note_store::{NoteStore, SettingsNoteStore, NOTES_SLOT_KEY};
pub use repo::settings_repo::{
    KeyValueStore, MemorySettings, SqliteSettingsRepository, StoreError, StoreResult,
};
pub use service::editor::{EditorError, EditorSession, NoteObserver};
pub use service::note_service::{NoteService, NoteServiceError};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
