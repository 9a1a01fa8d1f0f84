//! In-memory record set with synchronous persistence.
//!
//! # Responsibility
//! - Own the ordered record set for the lifetime of a session.
//! - Provide positional add/update/remove semantics.
//! - Mirror every mutation to the backing `RecordStore` before returning.
//!
//! # Invariants
//! - Insertion order is display and chart order.
//! - A failed save leaves both memory and storage unchanged; there is no
//!   dirty window.
//! - Positions are renumbered after a removal; callers must use fresh
//!   indices.

use crate::model::employee::{EmployeeRecord, RecordCandidate, ValidationError};
use crate::store::{RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure for record set operations.
#[derive(Debug)]
pub enum RepoError {
    /// Candidate broke the record contract.
    Validation(ValidationError),
    /// Target position does not exist in the current set.
    IndexOutOfRange { index: usize, len: usize },
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "record index {index} out of range (len {len})")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Ordered employee records backed by a `RecordStore`.
pub struct RecordRepository<S: RecordStore> {
    store: S,
    records: Vec<EmployeeRecord>,
}

impl<S: RecordStore> RecordRepository<S> {
    /// Loads the persisted set once and takes ownership of it.
    pub fn open(store: S) -> RepoResult<Self> {
        let records = store.load()?;
        info!(
            "event=repo_open module=repo status=ok count={}",
            records.len()
        );
        Ok(Self { store, records })
    }

    /// Appends a new record derived from `candidate`.
    pub fn add(&mut self, candidate: RecordCandidate) -> RepoResult<EmployeeRecord> {
        let record = build_record(candidate)?;
        let mut staged = self.records.clone();
        staged.push(record.clone());
        self.commit(staged)?;

        info!(
            "event=record_add module=repo status=ok index={} count={}",
            self.records.len() - 1,
            self.records.len()
        );
        Ok(record)
    }

    /// Replaces the record at `index` in full, re-deriving its remark.
    pub fn update(
        &mut self,
        index: usize,
        candidate: RecordCandidate,
    ) -> RepoResult<EmployeeRecord> {
        self.check_index("record_update", index)?;
        let record = build_record(candidate)?;
        let mut staged = self.records.clone();
        staged[index] = record.clone();
        self.commit(staged)?;

        info!(
            "event=record_update module=repo status=ok index={} count={}",
            index,
            self.records.len()
        );
        Ok(record)
    }

    /// Removes the record at `index`, shifting later records left by one.
    pub fn remove_at(&mut self, index: usize) -> RepoResult<EmployeeRecord> {
        self.check_index("record_remove", index)?;
        let mut staged = self.records.clone();
        let removed = staged.remove(index);
        self.commit(staged)?;

        info!(
            "event=record_remove module=repo status=ok index={} count={}",
            index,
            self.records.len()
        );
        Ok(removed)
    }

    /// Read-only view of the ordered set.
    pub fn all(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&EmployeeRecord> {
        self.records.get(index)
    }

    /// Reads the record at `index` for an edit request.
    ///
    /// A stale index is logged and reported like a failed mutation.
    pub fn record_at(&self, index: usize) -> RepoResult<&EmployeeRecord> {
        self.check_index("record_get", index)?;
        Ok(&self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn check_index(&self, event: &str, index: usize) -> RepoResult<()> {
        if index < self.records.len() {
            return Ok(());
        }
        warn!(
            "event={} module=repo status=error error_code=index_out_of_range index={} count={}",
            event,
            index,
            self.records.len()
        );
        Err(RepoError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    fn commit(&mut self, staged: Vec<EmployeeRecord>) -> RepoResult<()> {
        self.store.save(&staged)?;
        self.records = staged;
        Ok(())
    }
}

fn build_record(candidate: RecordCandidate) -> RepoResult<EmployeeRecord> {
    candidate.validate()?;
    Ok(EmployeeRecord::from_candidate(candidate))
}
