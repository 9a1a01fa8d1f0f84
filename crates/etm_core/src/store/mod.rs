//! Durable mirror of the record set.
//!
//! # Responsibility
//! - Serialize the full ordered record set under one fixed key.
//! - Recover from unreadable persisted content by starting empty.
//!
//! # Invariants
//! - `save` always writes the complete set; there is no partial update.
//! - `load` never fails because of corrupt content. Corruption is logged and
//!   treated as "no data" (lossy recovery). Only transport failures surface
//!   as `StoreError`.
//!
//! # Persisted layout
//! A JSON array in display order; each element carries string fields
//! `empId, position, name, activities, remarks` and integer fields
//! `contribution, taskCompleted`.

mod sqlite;

use crate::db::DbError;
use crate::model::employee::EmployeeRecord;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use sqlite::{KvStore, OwnedSqliteRecordStore, SqliteRecordStore};

/// Fixed storage key holding the serialized record set.
pub const STORAGE_KEY: &str = "etm_employees_v1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure that cannot be recovered locally.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Connection was not bootstrapped with `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode record set: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is below required {expected_version}; open it with open_db"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
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

/// Storage contract used by the record repository.
pub trait RecordStore {
    /// Reads the persisted record set. Missing or corrupt content yields an
    /// empty set.
    fn load(&self) -> StoreResult<Vec<EmployeeRecord>>;

    /// Replaces the persisted record set with `records`.
    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn load(&self) -> StoreResult<Vec<EmployeeRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()> {
        (**self).save(records)
    }
}

/// Encodes a record set into the persisted JSON layout.
pub fn encode_record_set(records: &[EmployeeRecord]) -> StoreResult<String> {
    serde_json::to_string(records).map_err(StoreError::Encode)
}

/// Decodes persisted JSON, returning `None` when the content is unusable.
///
/// Content is unusable when it is not a JSON array of records, or when any
/// record has an out-of-range score or a blank text field.
pub fn decode_record_set(raw: &str) -> Option<Vec<EmployeeRecord>> {
    let records: Vec<EmployeeRecord> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=store_load module=store status=recovered reason=malformed_json line={} column={}",
                err.line(),
                err.column()
            );
            return None;
        }
    };

    if let Some((index, err)) = records
        .iter()
        .enumerate()
        .find_map(|(index, record)| record.validate().err().map(|err| (index, err)))
    {
        warn!(
            "event=store_load module=store status=recovered reason=invalid_record index={} field={}",
            index,
            err.field()
        );
        return None;
    }

    Some(records)
}
