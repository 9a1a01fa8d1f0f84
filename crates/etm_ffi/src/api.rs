//! FFI use-case API for the embedding front-end.
//!
//! # Responsibility
//! - Expose form-level tracker actions (add/update/delete/edit-request).
//! - Return the refreshed list and chart payloads with every response, so
//!   the host re-renders from one snapshot.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One tracker session lives for the whole process. Storage is read once
//!   when the session opens; later calls work on the in-memory set.
//! - Charts are created with the session and mutated in place, so chart
//!   revisions keep increasing across calls.
//! - Indices in requests refer to the rows of the most recent response.

use etm_core::db::open_db;
use etm_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, CandidateInput, Chart,
    DeleteConfirmation, EditCursor, ListView, OwnedSqliteRecordStore, SnapshotBackend, Tracker,
    TrackerError, TrackerResult,
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const STORE_FILE_NAME: &str = "etm_employees.sqlite3";
static STORE_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<Session>> = Mutex::new(None);

type SessionTracker = Tracker<OwnedSqliteRecordStore, SnapshotBackend>;

/// Process-wide tracker bound to one SQLite file.
struct Session {
    path: PathBuf,
    tracker: SessionTracker,
}

impl Session {
    fn open(path: PathBuf) -> Result<Self, String> {
        let conn = open_db(&path).map_err(|err| err.to_string())?;
        let store = OwnedSqliteRecordStore::try_new(conn).map_err(|err| err.to_string())?;
        let tracker = Tracker::open(store, SnapshotBackend::new()).map_err(describe)?;
        info!(
            "event=ffi_session_open module=ffi status=ok count={}",
            tracker.records().len()
        );
        Ok(Self { path, tracker })
    }
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the SQLite file the tracker session opens.
///
/// # FFI contract
/// - May be called once, before the first tracker call; repeating the same
///   path is accepted.
/// - Returns an empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "store path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    if let Some(open_path) = open_session_path() {
        if open_path != requested {
            return format!(
                "tracker session already open on `{}`; refusing to switch to `{}`",
                open_path.display(),
                requested.display()
            );
        }
    }
    let active = STORE_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "store path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    String::new()
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFormInput {
    pub emp_id: String,
    pub position: String,
    pub name: String,
    pub contribution: String,
    pub activities: String,
    pub task_completed: String,
}

impl EmployeeFormInput {
    fn to_candidate_input(&self) -> CandidateInput {
        CandidateInput {
            emp_id: self.emp_id.clone(),
            position: self.position.clone(),
            name: self.name.clone(),
            contribution: self.contribution.clone(),
            activities: self.activities.clone(),
            task_completed: self.task_completed.clone(),
        }
    }
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub index: u32,
    pub emp_id: String,
    pub name: String,
    pub position: String,
    pub task_completed: u8,
    pub contribution: u8,
    pub activities: String,
    pub remarks: String,
}

/// Chart data to push into a long-lived chart on the host side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartPayload {
    /// Increases on every redraw of the same chart.
    pub revision: u64,
    pub labels: Vec<String>,
    pub data: Vec<u8>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
}

/// Response envelope for list and mutation calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeResponse {
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// Empty-state text when there are no rows.
    pub placeholder: Option<String>,
    pub rows: Vec<EmployeeRow>,
    pub task_chart: ChartPayload,
    pub contribution_chart: ChartPayload,
}

impl EmployeeResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Response envelope for an edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFormResponse {
    pub ok: bool,
    pub message: String,
    pub editing_index: Option<u32>,
    pub fields: EmployeeFormInput,
    pub remarks: String,
    pub submit_label: String,
}

/// Returns the current list and chart payloads.
#[flutter_rust_bridge::frb(sync)]
pub fn employee_list() -> EmployeeResponse {
    run_action("employee_list", |_tracker| Ok("Loaded.".to_string()))
}

/// Adds a record from raw form input.
#[flutter_rust_bridge::frb(sync)]
pub fn employee_add(input: EmployeeFormInput) -> EmployeeResponse {
    let candidate = match input.to_candidate_input().parse() {
        Ok(candidate) => candidate,
        Err(err) => return EmployeeResponse::failure(err.user_message()),
    };
    run_action("employee_add", move |tracker| {
        tracker.add(candidate)?;
        Ok("Employee added.".to_string())
    })
}

/// Replaces the record at `index` with raw form input.
#[flutter_rust_bridge::frb(sync)]
pub fn employee_update(index: u32, input: EmployeeFormInput) -> EmployeeResponse {
    let candidate = match input.to_candidate_input().parse() {
        Ok(candidate) => candidate,
        Err(err) => return EmployeeResponse::failure(err.user_message()),
    };
    run_action("employee_update", move |tracker| {
        tracker.update(index as usize, candidate)?;
        Ok("Changes saved.".to_string())
    })
}

/// Deletes the record at `index` if the user confirmed.
#[flutter_rust_bridge::frb(sync)]
pub fn employee_delete(index: u32, confirmed: bool) -> EmployeeResponse {
    let confirmation = if confirmed {
        DeleteConfirmation::Confirmed
    } else {
        DeleteConfirmation::Declined
    };
    run_action("employee_delete", move |tracker| {
        let removed = tracker.remove_at(index as usize, confirmation)?;
        Ok(match removed {
            Some(_) => "Employee deleted.".to_string(),
            None => "Delete cancelled.".to_string(),
        })
    })
}

/// Loads the record at `index` into form fields.
#[flutter_rust_bridge::frb(sync)]
pub fn employee_get(index: u32) -> EmployeeFormResponse {
    let result = with_tracker(|tracker| {
        let mut cursor = EditCursor::Idle;
        let snapshot = tracker.edit_request(index as usize, &mut cursor)?;
        Ok((snapshot, cursor))
    });

    match result {
        Ok((snapshot, cursor)) => EmployeeFormResponse {
            ok: true,
            message: String::new(),
            editing_index: Some(snapshot.index as u32),
            fields: EmployeeFormInput {
                emp_id: snapshot.input.emp_id,
                position: snapshot.input.position,
                name: snapshot.input.name,
                contribution: snapshot.input.contribution,
                activities: snapshot.input.activities,
                task_completed: snapshot.input.task_completed,
            },
            remarks: snapshot.remarks,
            submit_label: cursor.submit_label().to_string(),
        },
        Err(err) => EmployeeFormResponse {
            ok: false,
            message: format!("employee_get failed: {err}"),
            submit_label: EditCursor::Idle.submit_label().to_string(),
            ..EmployeeFormResponse::default()
        },
    }
}

fn run_action(
    action: &str,
    op: impl FnOnce(&mut SessionTracker) -> TrackerResult<String>,
) -> EmployeeResponse {
    let result = with_tracker(|tracker| {
        let message = op(&mut *tracker)?;
        Ok((message, snapshot_response(tracker)))
    });

    match result {
        Ok((message, mut response)) => {
            response.message = message;
            response
        }
        Err(err) => {
            warn!("event=ffi_action module=ffi status=error action={action} error={err}");
            EmployeeResponse::failure(format!("{action} failed: {err}"))
        }
    }
}

/// Runs `op` against the process session, opening it on first use.
fn with_tracker<T>(op: impl FnOnce(&mut SessionTracker) -> TrackerResult<T>) -> Result<T, String> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| "tracker session lock poisoned".to_string())?;
    let session = match guard.take() {
        Some(session) => session,
        None => Session::open(resolve_store_path())?,
    };
    let session = guard.insert(session);
    op(&mut session.tracker).map_err(describe)
}

fn open_session_path() -> Option<PathBuf> {
    let guard = SESSION.lock().ok()?;
    guard.as_ref().map(|session| session.path.clone())
}

fn describe(err: TrackerError) -> String {
    err.to_string()
}

fn snapshot_response(tracker: &SessionTracker) -> EmployeeResponse {
    let views = tracker.views();
    let placeholder = match views.list() {
        ListView::Empty { message } => Some(message.clone()),
        ListView::Rows { .. } => None,
    };
    let rows = views
        .list()
        .rows()
        .iter()
        .map(|row| EmployeeRow {
            index: row.index as u32,
            emp_id: row.emp_id.clone(),
            name: row.name.clone(),
            position: row.position.clone(),
            task_completed: row.task_completed,
            contribution: row.contribution,
            activities: row.activities.clone(),
            remarks: row.remarks.clone(),
        })
        .collect();

    EmployeeResponse {
        ok: true,
        message: String::new(),
        placeholder,
        rows,
        task_chart: chart_payload(views.task_chart()),
        contribution_chart: chart_payload(views.contribution_chart()),
    }
}

fn chart_payload(chart: &Chart) -> ChartPayload {
    ChartPayload {
        revision: chart.revision(),
        labels: chart.labels().to_vec(),
        data: chart.dataset().data.clone(),
        background_color: chart.dataset().background_color.clone(),
        border_color: chart.dataset().border_color.clone(),
    }
}

fn resolve_store_path() -> PathBuf {
    STORE_PATH
        .get()
        .cloned()
        .unwrap_or_else(|| std::env::temp_dir().join(STORE_FILE_NAME))
}
