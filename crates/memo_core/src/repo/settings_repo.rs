//! Key-value settings area contracts and implementations.
//!
//! # Responsibility
//! - Provide named blob slots, read and written whole.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set_value` fully replaces the previous value of a slot in one statement.
//! - Reading a slot that was never written yields `None`, not an error.

use crate::db::DbError;
use crate::model::archive::ArchiveError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for settings reads/writes and note store saves.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Archive(ArchiveError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Archive(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Archive(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ArchiveError> for StoreError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

/// Local key-value settings area holding opaque blobs.
pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    fn set_value(&self, key: &str, value: &[u8]) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_value(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get_value(key)
    }

    fn set_value(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set_value(key, value)
    }
}

/// SQLite-backed settings area over the `settings` table.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteSettingsRepository<'_> {
    fn get_value(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process settings area for tests and ephemeral sessions.
///
/// Not `Sync`; the core is driven from one thread at a time.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a slot has ever been written.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemorySettings {
    fn get_value(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set_value(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
