//! Core domain logic for the employee task tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod palette;
pub mod remark;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use form::{CandidateInput, EditCursor, FormSnapshot, SubmitAction};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::employee::{EmployeeRecord, RecordCandidate, Score, ValidationError};
pub use palette::{palette, shade, Hsl};
pub use remark::{derive_remark, Remark};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult};
pub use service::tracker::{DeleteConfirmation, Tracker, TrackerError, TrackerResult};
pub use store::{
    KvStore, OwnedSqliteRecordStore, RecordStore, SqliteRecordStore, StoreError, StoreResult,
    STORAGE_KEY,
};
pub use view::{
    Chart, ChartId, ChartKind, ListRow, ListView, RenderBackend, SnapshotBackend, ViewError,
    ViewSynchronizer,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
