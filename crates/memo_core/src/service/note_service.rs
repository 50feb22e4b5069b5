//! Note collection use-case service.
//!
//! # Responsibility
//! - Hold the ordered collection a note list screen displays.
//! - Create notes newest-first and apply edits by creation-time identity.
//! - Persist the full collection through an injected `NoteStore`.
//!
//! # Invariants
//! - Every mutation is followed by a full-collection save.
//! - An edit replaces the first note created at the same instant.

use crate::model::note::Note;
use crate::repo::note_store::NoteStore;
use crate::repo::settings_repo::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// No note in the collection was created at this instant.
    NoteNotFound(i64),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(time_created) => {
                write!(f, "note not found: timeCreated={time_created}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Note service facade over a store implementation.
pub struct NoteService<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service and fills it from `store.load_all()`.
    pub fn load(store: S) -> Self {
        let notes = store.load_all();
        Self { store, notes }
    }

    /// Notes in display order (newest created first for notes created here).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_at(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Finds the note created at `time_created`.
    pub fn find_by_time_created(&self, time_created: i64) -> Option<&Note> {
        self.notes
            .iter()
            .find(|note| note.time_created() == time_created)
    }

    /// Returns a copy of the note created at `time_created`, ready to edit.
    pub fn note_for_edit(&self, time_created: i64) -> Result<Note, NoteServiceError> {
        self.find_by_time_created(time_created)
            .cloned()
            .ok_or(NoteServiceError::NoteNotFound(time_created))
    }

    /// Creates a note with a derived title, prepends it, and saves.
    pub fn create_note(&mut self, body: impl Into<String>) -> Result<Note, NoteServiceError> {
        let note = Note::with_derived_title(body);
        self.notes.insert(0, note.clone());
        self.save()?;
        Ok(note)
    }

    /// Stores an edited note back into the collection and saves.
    ///
    /// Replaces the note created at the same instant; prepends the note
    /// when no such note exists.
    pub fn apply_edit(&mut self, edited: &Note) -> Result<(), NoteServiceError> {
        match self
            .notes
            .iter_mut()
            .find(|note| note.created_at_same_time(edited))
        {
            Some(slot) => *slot = edited.clone(),
            None => self.notes.insert(0, edited.clone()),
        }
        self.save()
    }

    /// Persists the current collection.
    pub fn save(&self) -> Result<(), NoteServiceError> {
        self.store.save_all(&self.notes)?;
        Ok(())
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteService, NoteServiceError};
    use crate::model::note::Note;
    use crate::repo::note_store::{NoteStore, SettingsNoteStore};
    use crate::repo::settings_repo::MemorySettings;

    #[test]
    fn note_for_edit_reports_unknown_creation_time() {
        let settings = MemorySettings::new();
        let service = NoteService::load(SettingsNoteStore::new(&settings));

        match service.note_for_edit(42) {
            Err(NoteServiceError::NoteNotFound(time_created)) => assert_eq!(time_created, 42),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn apply_edit_prepends_unknown_note() {
        let settings = MemorySettings::new();
        let store = SettingsNoteStore::new(&settings);
        let existing = Note::new("old", "old", Some(10), None).unwrap();
        store.save_all(std::slice::from_ref(&existing)).unwrap();

        let mut service = NoteService::load(&store);
        let stray = Note::new("stray", "stray", Some(20), None).unwrap();
        service.apply_edit(&stray).unwrap();

        assert_eq!(service.notes(), &[stray.clone(), existing.clone()]);
        assert_eq!(store.load_all(), vec![stray, existing]);
    }
}
