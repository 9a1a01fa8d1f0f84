use etm_core::db::{open_db, open_db_in_memory};
use etm_core::{
    EmployeeRecord, OwnedSqliteRecordStore, RecordCandidate, RecordStore, Score,
    SqliteRecordStore, StoreError, STORAGE_KEY,
};
use rusqlite::Connection;

fn record(emp_id: &str, name: &str, contribution: i64, task: i64) -> EmployeeRecord {
    EmployeeRecord::from_candidate(RecordCandidate {
        emp_id: emp_id.to_string(),
        position: "Eng".to_string(),
        name: name.to_string(),
        contribution: Score::new(contribution).unwrap(),
        activities: "sprint work".to_string(),
        task_completed: Score::new(task).unwrap(),
    })
}

#[test]
fn missing_key_loads_empty_set() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    assert!(store.load().unwrap().is_empty());
    assert_eq!(store.kv().get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn corrupt_content_loads_empty_set() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    store.kv().set(STORAGE_KEY, "not json").unwrap();
    assert!(store.load().unwrap().is_empty());

    store.kv().set(STORAGE_KEY, "{\"empId\": 3}").unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_overwrites_previous_content_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    store
        .save(&[record("E1", "Ann", 10, 10), record("E2", "Bo", 20, 20)])
        .unwrap();
    store.save(&[record("E3", "Cy", 30, 30)]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, vec![record("E3", "Cy", 30, 30)]);
}

#[test]
fn persisted_value_matches_wire_layout() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store.save(&[record("E1", "Ann", 92, 96)]).unwrap();

    let raw = store.kv().get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "empId": "E1",
            "position": "Eng",
            "name": "Ann",
            "contribution": 92,
            "activities": "sprint work",
            "taskCompleted": 96,
            "remarks": "🌟 Exceptional — top performer!"
        }])
    );
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("etm.sqlite3");
    let saved = vec![record("E1", "Ann", 92, 96), record("E1", "Ann", 92, 96)];

    {
        let conn = open_db(&path).unwrap();
        SqliteRecordStore::try_new(&conn)
            .unwrap()
            .save(&saved)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let loaded = SqliteRecordStore::try_new(&conn).unwrap().load().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn kv_remove_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    assert!(!store.kv().remove(STORAGE_KEY).unwrap());
    store.save(&[]).unwrap();
    assert!(store.kv().remove(STORAGE_KEY).unwrap());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRecordStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn owned_store_shares_layout_with_borrowed_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("etm.sqlite3");
    let saved = vec![record("E1", "Ann", 92, 96)];

    let owned = OwnedSqliteRecordStore::try_new(open_db(&path).unwrap()).unwrap();
    owned.save(&saved).unwrap();

    let conn = open_db(&path).unwrap();
    let borrowed = SqliteRecordStore::try_new(&conn).unwrap();
    assert_eq!(borrowed.load().unwrap(), saved);

    borrowed.kv().set(STORAGE_KEY, "not json").unwrap();
    assert!(owned.load().unwrap().is_empty());
}

#[test]
fn owned_store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    assert!(matches!(
        OwnedSqliteRecordStore::try_new(conn),
        Err(StoreError::UninitializedConnection { actual_version: 0, .. })
    ));
}
