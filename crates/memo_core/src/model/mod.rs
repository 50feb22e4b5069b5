//! Domain model for notes and their persisted archive.
//!
//! # Responsibility
//! - Define the note record and its title/timestamp rules.
//! - Define the versioned envelope stored in the settings slot.
//!
//! # Invariants
//! - A note's creation time is its identity; no separate ID exists.
//! - Deletion is omission from the saved collection.

pub mod archive;
pub mod note;
