//! Note collection persistence over a settings slot.
//!
//! # Responsibility
//! - Save the whole ordered note collection into the `"memo"` slot.
//! - Load it back, degrading to an empty collection on any read problem.
//!
//! # Invariants
//! - `save_all` replaces the slot; there is no merge or partial write.
//! - `load_all` never fails; missing or malformed data loads as empty.
//! - Log events carry counts and error codes only, never note text.

use crate::model::archive::{decode_notes, encode_notes};
use crate::model::note::Note;
use crate::repo::settings_repo::{KeyValueStore, StoreError, StoreResult};
use log::{error, info, warn};
use std::time::Instant;

/// Settings slot that holds the entire note collection.
pub const NOTES_SLOT_KEY: &str = "memo";

/// Persistence contract for the note collection.
pub trait NoteStore {
    /// Replaces the persisted collection with `notes`.
    fn save_all(&self, notes: &[Note]) -> StoreResult<()>;
    /// Loads the persisted collection in saved order.
    fn load_all(&self) -> Vec<Note>;
}

impl<T: NoteStore + ?Sized> NoteStore for &T {
    fn save_all(&self, notes: &[Note]) -> StoreResult<()> {
        (**self).save_all(notes)
    }

    fn load_all(&self) -> Vec<Note> {
        (**self).load_all()
    }
}

/// Note store backed by any key-value settings area.
pub struct SettingsNoteStore<K: KeyValueStore> {
    settings: K,
}

impl<K: KeyValueStore> SettingsNoteStore<K> {
    pub fn new(settings: K) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &K {
        &self.settings
    }
}

impl<K: KeyValueStore> NoteStore for SettingsNoteStore<K> {
    fn save_all(&self, notes: &[Note]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = encode_notes(notes)
            .map_err(StoreError::from)
            .and_then(|blob| self.settings.set_value(NOTES_SLOT_KEY, &blob));

        match &result {
            Ok(()) => info!(
                "event=notes_save module=store status=ok count={} duration_ms={}",
                notes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=notes_save module=store status=error count={} duration_ms={} error_code=notes_save_failed error={}",
                notes.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn load_all(&self) -> Vec<Note> {
        let blob = match self.settings.get_value(NOTES_SLOT_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                warn!("event=notes_load module=store status=empty reason=slot_missing key={NOTES_SLOT_KEY}");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error error_code=settings_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match decode_notes(&blob) {
            Ok(notes) => {
                info!(
                    "event=notes_load module=store status=ok count={}",
                    notes.len()
                );
                notes
            }
            Err(failure) => {
                warn!(
                    "event=notes_load module=store status=degraded error_code={} blob_bytes={} error={}",
                    failure.code(),
                    blob.len(),
                    failure
                );
                Vec::new()
            }
        }
    }
}
