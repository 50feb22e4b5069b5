//! Single-note editor session.
//!
//! # Responsibility
//! - Bind one note to a text input surface owned by the UI shell.
//! - Forward every text change to the note and notify the observer.
//!
//! # Invariants
//! - A session cannot be opened without a note.
//! - Each `text_changed` call notifies the observer exactly once, after the
//!   note has been updated.

use crate::model::note::Note;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Receives the updated note after every edit.
pub trait NoteObserver {
    fn note_edited(&mut self, note: &Note);
}

impl<F> NoteObserver for F
where
    F: FnMut(&Note),
{
    fn note_edited(&mut self, note: &Note) {
        self(note)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// The shell opened the editor without supplying a note; it should
    /// dismiss the editing screen.
    MissingNote,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNote => write!(f, "note is missing"),
        }
    }
}

impl Error for EditorError {}

/// Editing session over one note.
pub struct EditorSession<'a> {
    note: Note,
    observer: Option<Box<dyn NoteObserver + 'a>>,
}

impl<'a> EditorSession<'a> {
    /// Opens a session on `note`.
    ///
    /// # Errors
    /// - Returns `MissingNote` when `note` is `None`.
    pub fn open(note: Option<Note>) -> Result<Self, EditorError> {
        let Some(note) = note else {
            warn!("event=editor_open module=editor status=error error_code=note_missing");
            return Err(EditorError::MissingNote);
        };

        debug!(
            "event=editor_open module=editor status=ok time_created={} body_chars={}",
            note.time_created(),
            note.body().chars().count()
        );
        Ok(Self {
            note,
            observer: None,
        })
    }

    /// Registers the observer notified after every edit, replacing any
    /// previous one.
    pub fn with_observer(mut self, observer: impl NoteObserver + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Initial text for the input surface.
    pub fn text(&self) -> &str {
        self.note.body()
    }

    /// Whether the shell should focus the input right away (empty note).
    pub fn wants_focus(&self) -> bool {
        self.note.body().is_empty()
    }

    /// Applies new text from the input surface.
    pub fn text_changed(&mut self, new_text: impl Into<String>) -> &Note {
        self.note.update_body(new_text);
        if let Some(observer) = self.observer.as_mut() {
            observer.note_edited(&self.note);
        }
        &self.note
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn into_note(self) -> Note {
        self.note
    }
}
