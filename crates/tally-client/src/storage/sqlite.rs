use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::KeyValueStore;
use crate::setup::SetupContext;
use crate::state::{map_sqlite_error, open_connection};
use crate::{ClientError, ClientResult};

/// Key-value rows in the `internal_storage` table of the ledger database.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    connection: Connection,
    db_path: PathBuf,
}

impl SqliteKeyValueStore {
    /// Opens the store for an initialized ledger home.
    pub fn open(setup: &SetupContext) -> ClientResult<Self> {
        Self::open_at(&setup.db_path)
    }

    /// Opens a database file that has already been migrated.
    pub fn open_at(db_path: &Path) -> ClientResult<Self> {
        let connection = open_connection(db_path)?;
        Ok(Self {
            connection,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn rollback_after(&self, error: ClientError) -> ClientError {
        if let Err(rollback_error) = self.connection.execute_batch("ROLLBACK") {
            tracing::warn!(%rollback_error, "rollback failed after write error");
        }
        error
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        self.connection
            .query_row(
                "SELECT value FROM internal_storage WHERE key = ?1 LIMIT 1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))
    }

    fn put(&mut self, key: &str, value: &str) -> ClientResult<()> {
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.connection
            .execute(
                "INSERT INTO internal_storage (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        Ok(())
    }

    fn with_write_lock<T, F>(&mut self, operation: F) -> ClientResult<T>
    where
        F: FnOnce(&mut Self) -> ClientResult<T>,
    {
        // IMMEDIATE takes the write lock up front, so a concurrent writer waits
        // for the busy timeout instead of interleaving its read-modify-write.
        self.connection
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let value = match operation(self) {
            Ok(value) => value,
            Err(error) => return Err(self.rollback_after(error)),
        };

        if let Err(error) = self.connection.execute_batch("COMMIT") {
            let mapped = map_sqlite_error(&self.db_path, &error);
            return Err(self.rollback_after(mapped));
        }

        Ok(value)
    }
}
