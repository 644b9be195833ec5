//! Persistence slot contracts and implementations.
//!
//! # Responsibility
//! - Store whole serialized payloads under fixed string keys.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes replace the full payload of a slot; there are no partial writes.
//! - Reading an absent slot yields `None`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "required column `{table}.{column}` is missing; run migrations first"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value port for whole-payload persistence.
pub trait SlotRepository {
    /// Returns the stored payload, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the slot payload.
    fn write_slot(&self, key: &str, payload: &str) -> RepoResult<()>;
    /// Removes the slot. Clearing an absent slot is a no-op.
    fn clear_slot(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository over the `storage_slots` table.
pub struct SqliteSlotRepository {
    conn: Connection,
}

impl SqliteSlotRepository {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema was
    ///   not migrated.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl SlotRepository for SqliteSlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM storage_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, key: &str, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO storage_slots (slot_key, payload, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }

    fn clear_slot(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM storage_slots WHERE slot_key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local slot repository used by tests and embedders without disk.
#[derive(Debug, Default)]
pub struct InMemorySlotRepository {
    slots: RefCell<BTreeMap<String, String>>,
}

impl InMemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with one pre-seeded slot.
    pub fn with_slot(key: impl Into<String>, payload: impl Into<String>) -> Self {
        let repo = Self::default();
        repo.slots.borrow_mut().insert(key.into(), payload.into());
        repo
    }

    /// Returns a copy of the raw payload stored under `key`.
    pub fn raw_slot(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotRepository for InMemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.raw_slot(key))
    }

    fn write_slot(&self, key: &str, payload: &str) -> RepoResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn clear_slot(&self, key: &str) -> RepoResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "storage_slots")? {
        return Err(RepoError::MissingRequiredTable("storage_slots"));
    }

    for column in ["slot_key", "payload", "updated_at"] {
        if !table_has_column(conn, "storage_slots", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "storage_slots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
