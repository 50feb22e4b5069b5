//! Versioned archive envelope for the persisted note collection.
//!
//! # Responsibility
//! - Encode an ordered note collection as one blob.
//! - Decode blobs with explicit shape, version and per-note validation.
//!
//! # Invariants
//! - Decoding preserves the encoded order.
//! - A blob is accepted only when every element decodes as a valid `Note`.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Archive schema version written by this binary.
pub const ARCHIVE_VERSION: u32 = 1;

/// Encoding failure for note records and archives.
#[derive(Debug)]
pub enum ArchiveError {
    Encode(serde_json::Error),
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
        }
    }
}

/// Reason an archive blob was rejected.
///
/// Only used for diagnostics; callers degrade to an empty collection.
#[derive(Debug)]
pub enum DecodeFailure {
    /// The blob is not a `{version, notes: [...]}` envelope.
    NotACollection(serde_json::Error),
    /// The envelope was written by a newer schema.
    UnsupportedVersion { found: u32, supported: u32 },
    /// The element at `index` is not a valid note.
    InvalidNote { index: usize, reason: String },
}

impl DecodeFailure {
    /// Stable error code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotACollection(_) => "archive_not_collection",
            Self::UnsupportedVersion { .. } => "archive_unsupported_version",
            Self::InvalidNote { .. } => "archive_invalid_note",
        }
    }
}

impl Display for DecodeFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACollection(err) => write!(f, "blob is not a note collection: {err}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "archive version {found} is newer than supported {supported}"
            ),
            Self::InvalidNote { index, reason } => {
                write!(f, "element {index} is not a note: {reason}")
            }
        }
    }
}

#[derive(Serialize)]
struct ArchiveOut<'a> {
    version: u32,
    notes: &'a [Note],
}

#[derive(Deserialize)]
struct ArchiveIn {
    version: u32,
    notes: Vec<serde_json::Value>,
}

/// Encodes `notes` as one archive blob.
pub fn encode_notes(notes: &[Note]) -> Result<Vec<u8>, ArchiveError> {
    serde_json::to_vec(&ArchiveOut {
        version: ARCHIVE_VERSION,
        notes,
    })
    .map_err(ArchiveError::Encode)
}

/// Decodes an archive blob into notes, in stored order.
pub fn decode_notes(blob: &[u8]) -> Result<Vec<Note>, DecodeFailure> {
    let archive: ArchiveIn = serde_json::from_slice(blob).map_err(DecodeFailure::NotACollection)?;

    if archive.version > ARCHIVE_VERSION {
        return Err(DecodeFailure::UnsupportedVersion {
            found: archive.version,
            supported: ARCHIVE_VERSION,
        });
    }

    archive
        .notes
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Note>(value).map_err(|err| DecodeFailure::InvalidNote {
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}
