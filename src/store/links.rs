// src/store/links.rs
// =============================================================================
// SQLite storage for visited links.
//
// One table, one row per visited URL:
//   links(id INTEGER PRIMARY KEY AUTOINCREMENT, url TEXT UNIQUE, status INTEGER)
//
// Inserts use INSERT OR IGNORE, so recording the same URL twice is a
// no-op rather than an error.
//
// The connection sits behind a std Mutex. Every statement is a single
// small write to a local file, so holding the lock across it is fine even
// from async code.
// =============================================================================

use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;

use crate::error::StoreError;

/// One visited URL and the HTTP status it answered with.
/// `status` is None when no status was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub url: String,
    pub status: Option<u16>,
}

pub struct LinkStore {
    conn: Mutex<Connection>,
}

impl LinkStore {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// A private database that disappears when the store is dropped.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT UNIQUE,
                status INTEGER
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Stores a visit. Returns false if the URL was already stored.
    pub fn record(&self, url: &str, status: Option<u16>) -> Result<bool, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO links (url, status) VALUES (?1, ?2)",
            params![url, status],
        )?;
        Ok(inserted > 0)
    }

    /// Every stored record, oldest first.
    pub fn read_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT url, status FROM links ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(LinkRecord {
                url: row.get(0)?,
                status: row.get(1)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
