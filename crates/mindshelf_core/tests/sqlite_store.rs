use chrono::{DateTime, Duration, TimeZone, Utc};
use mindshelf_core::db::open_db_in_memory;
use mindshelf_core::{Modality, SqliteThoughtStore, StoreError, ThoughtRecord, ThoughtStore};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap()
}

fn store() -> SqliteThoughtStore {
    SqliteThoughtStore::new(open_db_in_memory().unwrap())
}

#[test]
fn import_and_list_roundtrip_preserves_fields() {
    let store = store();
    let mut record = ThoughtRecord::with_id("t-1", "tasks", Modality::Image, base_time());
    record.title = Some("Fix bike".to_string());
    record.content = Some("- [ ] tyre".to_string());
    record.source_url = Some("https://example.com".to_string());
    record.image_ref = Some("data:image/jpeg;base64,AAAA".to_string());
    record.updated_at = Some(base_time() + Duration::milliseconds(1_500));
    record.completed = Some(false);
    record.status = Some("open".to_string());
    record.due_at = Some("2025-02-10".to_string());
    store.import_thoughts(&[record.clone()]).unwrap();

    let listed = store.list_by_folder("tasks").unwrap();
    assert_eq!(listed, vec![record]);
}

#[test]
fn list_is_scoped_to_folder_and_empty_when_missing() {
    let store = store();
    store
        .import_thoughts(&[ThoughtRecord::with_id("a", "tasks", Modality::Text, base_time())])
        .unwrap();
    store
        .import_thoughts(&[ThoughtRecord::with_id("b", "notes", Modality::Text, base_time())])
        .unwrap();

    let tasks = store.list_by_folder("tasks").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "a");
    assert!(store.list_by_folder("reads").unwrap().is_empty());
}

#[test]
fn import_replaces_existing_record() {
    let store = store();
    let mut record = ThoughtRecord::with_id("a", "inbox", Modality::Text, base_time());
    store.import_thoughts(&[record.clone()]).unwrap();

    record.folder = "tasks".to_string();
    record.status = Some("done".to_string());
    store.import_thoughts(&[record.clone()]).unwrap();

    assert!(store.list_by_folder("inbox").unwrap().is_empty());
    let tasks = store.list_by_folder("tasks").unwrap();
    assert_eq!(tasks[0].status.as_deref(), Some("done"));
}

#[test]
fn import_is_all_or_nothing() {
    let store = store();
    let good = ThoughtRecord::with_id("good", "inbox", Modality::Text, base_time());
    let bad = ThoughtRecord::with_id("", "inbox", Modality::Text, base_time());

    let err = store.import_thoughts(&[good.clone(), bad]).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.list_by_folder("inbox").unwrap().is_empty());

    assert_eq!(store.import_thoughts(&[good]).unwrap(), 1);
    assert_eq!(store.list_by_folder("inbox").unwrap().len(), 1);
}

#[test]
fn unknown_modality_in_snapshot_reads_as_other() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO thoughts (id, modality, folder, created_at) VALUES ('x', 'fax', 'inbox', ?1);",
        [base_time().timestamp_millis()],
    )
    .unwrap();
    let store = SqliteThoughtStore::new(conn);

    let listed = store.list_by_folder("inbox").unwrap();
    assert_eq!(listed[0].modality, Modality::Other);
}
