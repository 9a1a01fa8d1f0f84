use etm_core::db::open_db_in_memory;
use etm_core::view::EMPTY_LIST_MESSAGE;
use etm_core::{
    CandidateInput, Chart, ChartId, ChartKind, DeleteConfirmation, EditCursor, ListView,
    RecordStore, RenderBackend, RepoError, SnapshotBackend, SqliteRecordStore, Tracker,
    TrackerError, ViewError, STORAGE_KEY,
};

fn input(emp_id: &str, name: &str, contribution: &str, task: &str) -> CandidateInput {
    CandidateInput {
        emp_id: emp_id.to_string(),
        position: "Eng".to_string(),
        name: name.to_string(),
        contribution: contribution.to_string(),
        activities: "shipped v2".to_string(),
        task_completed: task.to_string(),
    }
}

struct MissingChartBackend;

impl RenderBackend for MissingChartBackend {
    fn probe(&mut self) -> Result<(), String> {
        Err("chart library not loaded".to_string())
    }

    fn render_list(&mut self, _view: &ListView) {}

    fn redraw_chart(&mut self, _chart: &Chart) {}
}

#[test]
fn adding_one_record_updates_list_and_both_charts() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();

    let candidate = input("E1", "Ann", "92", "96").parse().unwrap();
    let record = tracker.add(candidate).unwrap();
    assert_eq!(record.remarks, "🌟 Exceptional — top performer!");

    let backend = tracker.views().backend();
    let rows = backend.list().unwrap().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].emp_id, "E1");
    assert_eq!(rows[0].remarks, record.remarks);

    let task_chart = backend.chart(ChartId::TaskCompletion).unwrap();
    assert_eq!(task_chart.kind(), ChartKind::Bar);
    assert_eq!(task_chart.labels(), ["Ann".to_string()]);
    assert_eq!(task_chart.dataset().data, vec![96]);
    assert_eq!(task_chart.dataset().background_color, vec!["hsl(0, 85%, 55%)"]);
    assert_eq!(task_chart.dataset().border_color, vec!["hsl(0, 85%, 39%)"]);

    let contribution_chart = backend.chart(ChartId::Contribution).unwrap();
    assert_eq!(contribution_chart.kind(), ChartKind::Doughnut);
    assert_eq!(contribution_chart.labels(), ["Ann".to_string()]);
    assert_eq!(contribution_chart.dataset().data, vec![92]);
    assert_eq!(
        contribution_chart.dataset().background_color,
        task_chart.dataset().background_color
    );
}

#[test]
fn opening_renders_placeholder_and_empty_charts() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();

    let backend = tracker.views().backend();
    assert_eq!(
        backend.list(),
        Some(&ListView::Empty {
            message: EMPTY_LIST_MESSAGE.to_string()
        })
    );
    assert!(backend
        .chart(ChartId::TaskCompletion)
        .unwrap()
        .labels()
        .is_empty());
    assert_eq!(backend.list_renders(), 1);
    assert_eq!(backend.chart_redraws(), 2);
}

#[test]
fn charts_are_mutated_in_place_on_every_change() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();

    tracker.add(input("E1", "Ann", "10", "10").parse().unwrap()).unwrap();
    tracker.add(input("E2", "Bo", "20", "20").parse().unwrap()).unwrap();
    tracker.remove_at(0, DeleteConfirmation::Confirmed).unwrap();

    let views = tracker.views();
    assert_eq!(views.task_chart().revision(), 4);
    assert_eq!(views.contribution_chart().revision(), 4);
    assert_eq!(views.task_chart().labels(), ["Bo".to_string()]);
    assert_eq!(views.list().rows()[0].index, 0);
    assert_eq!(views.backend().chart_redraws(), 8);
}

#[test]
fn colors_are_stable_across_rerenders() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();

    tracker.add(input("E1", "Ann", "10", "10").parse().unwrap()).unwrap();
    tracker.add(input("E2", "Bo", "20", "20").parse().unwrap()).unwrap();
    let before = tracker.views().task_chart().dataset().background_color.clone();

    tracker
        .update(1, input("E2", "Bo", "30", "30").parse().unwrap())
        .unwrap();
    let after = &tracker.views().task_chart().dataset().background_color;
    assert_eq!(&before, after);
}

#[test]
fn submit_routes_by_edit_cursor() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();
    let mut cursor = EditCursor::default();

    tracker
        .submit(&mut cursor, input("E1", "Ann", "50", "50").parse().unwrap())
        .unwrap();
    tracker
        .submit(&mut cursor, input("E2", "Bo", "50", "50").parse().unwrap())
        .unwrap();

    let snapshot = tracker.edit_request(1, &mut cursor).unwrap();
    assert_eq!(cursor, EditCursor::Editing(1));
    assert_eq!(snapshot.input.name, "Bo");
    assert_eq!(snapshot.input.task_completed, "50");

    let mut edited = snapshot.input.clone();
    edited.task_completed = "97".to_string();
    edited.contribution = "95".to_string();
    let record = tracker
        .submit(&mut cursor, edited.parse().unwrap())
        .unwrap();

    assert_eq!(cursor, EditCursor::Idle);
    assert_eq!(record.remarks, "🌟 Exceptional — top performer!");
    assert_eq!(tracker.records().len(), 2);
    assert_eq!(tracker.records()[1], record);
}

#[test]
fn failed_submit_keeps_edit_cursor() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();
    tracker.add(input("E1", "Ann", "50", "50").parse().unwrap()).unwrap();

    let mut cursor = EditCursor::Editing(4);
    let err = tracker
        .submit(&mut cursor, input("E1", "Ann", "60", "60").parse().unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Repo(RepoError::IndexOutOfRange { index: 4, len: 1 })
    ));
    assert_eq!(cursor, EditCursor::Editing(4));
}

#[test]
fn edit_request_for_missing_row_leaves_cursor_idle() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(store, SnapshotBackend::new()).unwrap();
    tracker.add(input("E1", "Ann", "50", "50").parse().unwrap()).unwrap();

    let mut cursor = EditCursor::Idle;
    let err = tracker.edit_request(3, &mut cursor).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Repo(RepoError::IndexOutOfRange { index: 3, len: 1 })
    ));
    assert_eq!(cursor, EditCursor::Idle);
}

#[test]
fn declined_delete_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let mut tracker = Tracker::open(&store, SnapshotBackend::new()).unwrap();
    tracker.add(input("E1", "Ann", "50", "50").parse().unwrap()).unwrap();
    let redraws = tracker.views().backend().chart_redraws();

    let removed = tracker.remove_at(0, DeleteConfirmation::Declined).unwrap();
    assert!(removed.is_none());
    assert_eq!(tracker.records().len(), 1);
    assert_eq!(store.load().unwrap().len(), 1);
    assert_eq!(tracker.views().backend().chart_redraws(), redraws);
}

#[test]
fn corrupt_storage_starts_an_empty_session() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store.kv().set(STORAGE_KEY, "not json").unwrap();

    let mut tracker = Tracker::open(&store, SnapshotBackend::new()).unwrap();
    assert!(tracker.records().is_empty());

    tracker.add(input("E1", "Ann", "50", "50").parse().unwrap()).unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn missing_chart_backend_is_fatal() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    match Tracker::open(store, MissingChartBackend) {
        Err(TrackerError::View(ViewError::RenderingUnavailable(reason))) => {
            assert!(reason.contains("chart library"))
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected rendering unavailable"),
    }
}
