//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Define the editing boundary the UI shell drives.

pub mod editor;
pub mod note_service;
