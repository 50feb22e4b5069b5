//! Persistence layer: the settings area and the note store on top of it.
//!
//! # Responsibility
//! - Define storage contracts that callers receive by injection.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Read paths degrade to empty results instead of surfacing decode errors.
//! - Write paths surface backend failures as `StoreError`.

pub mod note_store;
pub mod settings_repo;
