//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted note record.
//! - Derive short titles from note bodies.
//! - Provide the per-note encode/decode contract.
//!
//! # Invariants
//! - `time_created` is set once and never changes.
//! - `time_last_edited >= time_created` for every constructed or decoded note.
//! - `title` is never re-derived after construction.
//!
//! # See also
//! - `model::archive` for the persisted collection envelope.

use crate::model::archive::ArchiveError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of characters taken from the body for a derived title.
pub const DERIVED_TITLE_MAX_CHARS: usize = 10;

/// Validation errors for note construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `time_last_edited` is earlier than `time_created`.
    InvalidEditWindow { created: i64, last_edited: i64 },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEditWindow {
                created,
                last_edited,
            } => write!(
                f,
                "timeLastEdited ({last_edited}) must be >= timeCreated ({created})"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// One user note.
///
/// Timestamps are Unix epoch milliseconds. Fields are private so the
/// creation time stays immutable and body edits always move the edit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NoteRecord")]
pub struct Note {
    body: String,
    title: String,
    time_created: i64,
    time_last_edited: i64,
}

/// Wire shape used while decoding; every key is required.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    body: String,
    title: String,
    time_created: i64,
    time_last_edited: i64,
}

impl TryFrom<NoteRecord> for Note {
    type Error = NoteValidationError;

    fn try_from(record: NoteRecord) -> Result<Self, Self::Error> {
        Note::new(
            record.body,
            record.title,
            Some(record.time_created),
            Some(record.time_last_edited),
        )
    }
}

impl Note {
    /// Creates a note from explicit fields.
    ///
    /// `time_created` defaults to now, `time_last_edited` defaults to
    /// `time_created`.
    ///
    /// # Errors
    /// - Returns `InvalidEditWindow` when `time_last_edited < time_created`.
    pub fn new(
        body: impl Into<String>,
        title: impl Into<String>,
        time_created: Option<i64>,
        time_last_edited: Option<i64>,
    ) -> Result<Self, NoteValidationError> {
        let time_created = time_created.unwrap_or_else(now_epoch_ms);
        let time_last_edited = time_last_edited.unwrap_or(time_created);
        if time_last_edited < time_created {
            return Err(NoteValidationError::InvalidEditWindow {
                created: time_created,
                last_edited: time_last_edited,
            });
        }

        Ok(Self {
            body: body.into(),
            title: title.into(),
            time_created,
            time_last_edited,
        })
    }

    /// Creates a note with an explicit title, stamped with the current time.
    pub fn with_title(body: impl Into<String>, title: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            body: body.into(),
            title: title.into(),
            time_created: now,
            time_last_edited: now,
        }
    }

    /// Creates a note whose title is derived from `body`.
    pub fn with_derived_title(body: impl Into<String>) -> Self {
        let body = body.into();
        let title = derive_title(&body);
        Self::with_title(body, title)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn time_created(&self) -> i64 {
        self.time_created
    }

    pub fn time_last_edited(&self) -> i64 {
        self.time_last_edited
    }

    /// Replaces the body and stamps the edit with the current time.
    ///
    /// Returns the updated note so callers can decide when to persist.
    pub fn update_body(&mut self, new_body: impl Into<String>) -> &Note {
        self.update_body_at(new_body, now_epoch_ms())
    }

    /// Replaces the body and stamps the edit with `edited_at`.
    ///
    /// The edit time is clamped to `time_created` so a clock that moved
    /// backwards cannot produce an edit earlier than creation.
    pub fn update_body_at(&mut self, new_body: impl Into<String>, edited_at: i64) -> &Note {
        self.body = new_body.into();
        self.time_last_edited = edited_at.max(self.time_created);
        self
    }

    /// Returns whether both notes share the exact creation timestamp.
    ///
    /// Creation time is the only stable identity a note has.
    pub fn created_at_same_time(&self, other: &Note) -> bool {
        self.time_created == other.time_created
    }

    /// Encodes this note as a keyed record (`body`, `title`, `timeCreated`,
    /// `timeLastEdited`).
    pub fn encode(&self) -> Result<Vec<u8>, ArchiveError> {
        serde_json::to_vec(self).map_err(ArchiveError::Encode)
    }

    /// Decodes a note previously produced by [`Note::encode`].
    ///
    /// Returns `None` when any key is missing, has the wrong type, or the
    /// timestamps are reversed.
    pub fn decode(blob: &[u8]) -> Option<Note> {
        serde_json::from_slice(blob).ok()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::with_derived_title(String::new())
    }
}

/// Derives a title: the first ten characters of `body`, or all of it.
pub fn derive_title(body: &str) -> String {
    body.chars().take(DERIVED_TITLE_MAX_CHARS).collect()
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock reads before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
