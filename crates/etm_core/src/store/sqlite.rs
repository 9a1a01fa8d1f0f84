//! SQLite-backed key-value storage and record store.

use super::{
    decode_record_set, encode_record_set, RecordStore, StoreError, StoreResult, STORAGE_KEY,
};
use crate::db::migrations::{current_version, latest_version};
use crate::model::employee::EmployeeRecord;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Instant;

/// Raw string storage over the `kv_entries` table.
pub struct KvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvStore<'conn> {
    /// Wraps a connection that has been bootstrapped by `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version < expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Inserts or fully overwrites the value stored under `key`.
    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    /// Removes `key`, returning whether a value existed.
    pub fn remove(&self, key: &str) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Record store persisting the whole set as JSON under `STORAGE_KEY`.
pub struct SqliteRecordStore<'conn> {
    kv: KvStore<'conn>,
}

impl<'conn> SqliteRecordStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        Ok(Self {
            kv: KvStore::try_new(conn)?,
        })
    }

    /// Underlying key-value view, for raw inspection.
    pub fn kv(&self) -> &KvStore<'conn> {
        &self.kv
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn load(&self) -> StoreResult<Vec<EmployeeRecord>> {
        let started_at = Instant::now();
        let raw = match self.kv.get(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=kv_read_failed error={}",
                    err
                );
                return Err(err);
            }
        };

        let Some(raw) = raw else {
            info!("event=store_load module=store status=ok reason=missing_key count=0");
            return Ok(Vec::new());
        };

        let records = decode_record_set(&raw).unwrap_or_default();
        info!(
            "event=store_load module=store status=ok count={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()> {
        let started_at = Instant::now();
        let encoded = encode_record_set(records)?;
        if let Err(err) = self.kv.set(STORAGE_KEY, &encoded) {
            error!(
                "event=store_save module=store status=error error_code=kv_write_failed count={} error={}",
                records.len(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
            records.len(),
            encoded.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Record store that owns its connection, for sessions that outlive the
/// caller's stack frame.
pub struct OwnedSqliteRecordStore {
    conn: Connection,
}

impl OwnedSqliteRecordStore {
    /// Takes ownership of a connection bootstrapped by `open_db*`.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        KvStore::try_new(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn kv(&self) -> KvStore<'_> {
        KvStore { conn: &self.conn }
    }

    fn borrowed(&self) -> SqliteRecordStore<'_> {
        SqliteRecordStore { kv: self.kv() }
    }
}

impl RecordStore for OwnedSqliteRecordStore {
    fn load(&self) -> StoreResult<Vec<EmployeeRecord>> {
        self.borrowed().load()
    }

    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()> {
        self.borrowed().save(records)
    }
}
