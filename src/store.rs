//! SQLite-backed entry store.
//!
//! One append-only `messages` table. Migrations are append-only as well: new
//! schema changes go at the end of [`MIGRATIONS`], existing ones are never
//! edited.

use crate::entry::{Entry, NewEntry};
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "
        CREATE TABLE IF NOT EXISTS messages (
            id        INTEGER PRIMARY KEY,
            name      TEXT    NOT NULL,
            message   TEXT    NOT NULL,
            timestamp TEXT    NOT NULL
        );
    ",
}];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unable to prepare database directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Database connection is unavailable")]
    Poisoned,
}

/// Owns the single database connection for the lifetime of the process.
pub struct EntryStore {
    conn: Mutex<Connection>,
}

impl EntryStore {
    /// Opens (or creates) the database at `path` and applies pending migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "wal")?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_meta (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;
        apply_migrations(&conn, MIGRATIONS)?;
        Ok(EntryStore {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts one row and returns it with its assigned id.
    pub fn append(&self, entry: &NewEntry) -> Result<Entry, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO messages (name, message, timestamp) VALUES (?1, ?2, ?3)",
            params![entry.name, entry.message, entry.timestamp],
        )?;
        Ok(Entry {
            id: conn.last_insert_rowid(),
            name: entry.name.clone(),
            message: entry.message.clone(),
            timestamp: entry.timestamp.clone(),
        })
    }

    /// Returns every entry in insertion order.
    pub fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, message, timestamp FROM messages ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Entry {
                id: row.get(0)?,
                name: row.get(1)?,
                message: row.get(2)?,
                timestamp: row.get(3)?,
            })
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

/// Applies each pending migration together with its `schema_meta` row in one
/// transaction, so a version is recorded exactly when its schema change is.
fn apply_migrations(conn: &Connection, migrations: &[Migration]) -> Result<(), StoreError> {
    let max_applied: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_meta",
        [],
        |row| row.get(0),
    )?;
    for m in migrations {
        if m.version > max_applied {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(m.sql)?;
            tx.execute("INSERT INTO schema_meta (version) VALUES (?1)", [m.version])?;
            tx.commit()?;
        }
    }
    Ok(())
}
