//! Durable keyed store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist one JSON document per collection key and reload it later.
//! - Keep persistence failures out of the domain layer: reads fall back,
//!   writes are logged and swallowed.
//!
//! # Invariants
//! - `save` is a whole-value overwrite; there is no incremental diffing.
//! - Construction fails fast on a connection without the migrated schema.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::warn;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::migrations::latest_version;
use crate::db::DbError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Construction/transport error for the keyed store.
///
/// Only construction surfaces these; `load`/`save` never fail outward.
#[derive(Debug)]
pub enum StoreError {
    /// The connection has no applied migrations. Requesting store
    /// operations against it is a programming error, caught here.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: expected schema version {expected_version}, found {actual_version}; open it via db::open_db first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Durable keyed store: named JSON-serializable values with load/save
/// semantics. The entity store mirrors each collection through one key.
pub trait KeyedStore {
    /// Loads the value stored under `key`, or `fallback` when the key is
    /// missing, the stored document fails to decode, or the backing
    /// medium is unavailable. Never fails outward.
    fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T;

    /// Persists `value` under `key` as a whole-value overwrite. Failures
    /// are logged and swallowed; in-memory state stays authoritative.
    fn save<T: Serialize>(&self, key: &str, value: &T);
}

/// SQLite-backed keyed store over the `collections` table.
pub struct SqliteKeyedStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyedStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when no migration has been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema
    ///   does not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyedStore for SqliteKeyedStore<'_> {
    fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let row = self.conn.query_row(
            "SELECT value FROM collections WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        );

        match row {
            Ok(document) => match serde_json::from_str(&document) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        "event=store_load module=repo status=decode_error key={key} error={err}"
                    );
                    fallback
                }
            },
            Err(rusqlite::Error::QueryReturnedNoRows) => fallback,
            Err(err) => {
                warn!("event=store_load module=repo status=error key={key} error={err}");
                fallback
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        let document = match serde_json::to_string(value) {
            Ok(document) => document,
            Err(err) => {
                warn!("event=store_save module=repo status=encode_error key={key} error={err}");
                return;
            }
        };

        let result = self.conn.execute(
            "INSERT INTO collections (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, document],
        );

        if let Err(err) = result {
            warn!("event=store_save module=repo status=error key={key} error={err}");
        }
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version == 0 {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "collections")? {
        return Err(StoreError::MissingRequiredTable("collections"));
    }

    for column in ["key", "value"] {
        if !table_has_column(conn, "collections", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "collections",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
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

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
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
