//! Tracker application state.
//!
//! # Responsibility
//! - Own the record repository and the view synchronizer for one session.
//! - Run each user action to completion: validate, mutate, persist, resync.
//!
//! # Invariants
//! - Views are resynchronized after every successful mutation and never
//!   after a failed one.
//! - A declined delete confirmation changes nothing.
//! - Submitting resets the edit cursor only on success, so a rejected form
//!   keeps its state for correction.

use crate::form::{EditCursor, FormSnapshot, SubmitAction};
use crate::model::employee::{EmployeeRecord, RecordCandidate};
use crate::repo::record_repo::{RecordRepository, RepoError};
use crate::store::RecordStore;
use crate::view::{RenderBackend, ViewError, ViewSynchronizer};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug)]
pub enum TrackerError {
    Repo(RepoError),
    View(ViewError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::View(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::View(err) => Some(err),
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ViewError> for TrackerError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

/// Answer to the interactive "Delete this employee?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

/// Session-scoped owner of the record set and its views.
pub struct Tracker<S: RecordStore, B: RenderBackend> {
    repo: RecordRepository<S>,
    views: ViewSynchronizer<B>,
}

impl<S: RecordStore, B: RenderBackend> Tracker<S, B> {
    /// Loads the persisted set, starts the views, and renders once.
    ///
    /// # Errors
    /// - `View(RenderingUnavailable)` when the backend probe fails.
    /// - `Repo(Store(..))` on storage transport failures.
    pub fn open(store: S, backend: B) -> TrackerResult<Self> {
        let repo = RecordRepository::open(store)?;
        let mut views = ViewSynchronizer::start(backend)?;
        views.sync(repo.all());
        info!(
            "event=tracker_open module=service status=ok count={}",
            repo.len()
        );
        Ok(Self { repo, views })
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        self.repo.all()
    }

    pub fn views(&self) -> &ViewSynchronizer<B> {
        &self.views
    }

    pub fn repository(&self) -> &RecordRepository<S> {
        &self.repo
    }

    pub fn add(&mut self, candidate: RecordCandidate) -> TrackerResult<EmployeeRecord> {
        let record = self.repo.add(candidate)?;
        self.resync();
        Ok(record)
    }

    pub fn update(
        &mut self,
        index: usize,
        candidate: RecordCandidate,
    ) -> TrackerResult<EmployeeRecord> {
        let record = self.repo.update(index, candidate)?;
        self.resync();
        Ok(record)
    }

    /// Routes a form submission by the edit cursor and clears it on success.
    pub fn submit(
        &mut self,
        cursor: &mut EditCursor,
        candidate: RecordCandidate,
    ) -> TrackerResult<EmployeeRecord> {
        let record = match cursor.action() {
            SubmitAction::Add => self.add(candidate)?,
            SubmitAction::UpdateAt(index) => self.update(index, candidate)?,
        };
        cursor.clear();
        Ok(record)
    }

    /// Loads the record at `index` into form fields and marks it as edited.
    pub fn edit_request(
        &self,
        index: usize,
        cursor: &mut EditCursor,
    ) -> TrackerResult<FormSnapshot> {
        let record = self.repo.record_at(index)?;
        *cursor = EditCursor::Editing(index);
        Ok(FormSnapshot::from_record(index, record))
    }

    /// Removes the record at `index` once confirmed.
    ///
    /// Returns the removed record, or `None` when the user declined.
    pub fn remove_at(
        &mut self,
        index: usize,
        confirmation: DeleteConfirmation,
    ) -> TrackerResult<Option<EmployeeRecord>> {
        if confirmation == DeleteConfirmation::Declined {
            info!(
                "event=record_remove module=service status=skipped reason=declined index={}",
                index
            );
            return Ok(None);
        }

        let removed = self.repo.remove_at(index)?;
        self.resync();
        Ok(Some(removed))
    }

    /// Shuts the session down and hands back the backend.
    pub fn into_backend(self) -> B {
        self.views.into_backend()
    }

    fn resync(&mut self) {
        self.views.sync(self.repo.all());
    }
}
