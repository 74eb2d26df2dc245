use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn inserts_and_lists_notes_in_insertion_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage
        .insert_note(&Note::new("groceries", "eggs, milk"))
        .await
        .expect("first note");
    let second = storage
        .insert_note(&Note::new("ideas", "write more tests"))
        .await
        .expect("second note");
    assert!(second.0 > first.0);

    let notes = storage.list_notes().await.expect("list");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].note_id, first);
    assert_eq!(notes[0].as_note(), Note::new("groceries", "eggs, milk"));
    assert_eq!(notes[1].title, "ideas");
    assert_eq!(notes[1].kind, NoteKind::Note);
    assert_eq!(storage.count_notes().await.expect("count"), 2);
}

#[tokio::test]
async fn rejects_unknown_kind_rows_on_read() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    sqlx::query("INSERT INTO notes (title, content, kind) VALUES ('t', 'c', 'memo')")
        .execute(storage.pool())
        .await
        .expect("raw insert");

    let err = storage.list_notes().await.expect_err("unknown kind");
    assert!(err.to_string().contains("memo"), "{err}");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("notes.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage
        .insert_note(&Note::new("persisted", "on disk"))
        .await
        .expect("insert");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(reopened.count_notes().await.expect("count"), 1);
}

#[test]
fn memory_urls_have_no_parent_dir() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(sqlite_path("postgres://localhost/db"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/notes.db?mode=rwc"),
        Some(PathBuf::from("./data/notes.db"))
    );
}
