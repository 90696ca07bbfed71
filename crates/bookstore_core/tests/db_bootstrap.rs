use bookstore_core::db::{
    ensure_catalogue_with, open_db, open_db_in_memory, seed_books, seed_catalogue, DbError,
    SeedStatus, CATALOGUE_TABLE,
};
use bookstore_core::{BookRecord, BookRepository, SqliteBookRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_and_seeds_catalogue() {
    let (conn, status) = open_db_in_memory().unwrap();

    assert_eq!(status, SeedStatus::Seeded { count: 5 });
    assert_table_exists(&conn, CATALOGUE_TABLE);

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert_eq!(repo.query_all().unwrap(), seed_books());
}

#[test]
fn opening_same_database_twice_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.sqlite3");

    let (conn_first, first_status) = open_db(&path).unwrap();
    assert_eq!(first_status, SeedStatus::Seeded { count: 5 });
    let first_rows = SqliteBookRepository::try_new(&conn_first)
        .unwrap()
        .query_all()
        .unwrap();
    drop(conn_first);

    let (conn_second, second_status) = open_db(&path).unwrap();
    assert_eq!(second_status, SeedStatus::AlreadyPresent);
    let second_rows = SqliteBookRepository::try_new(&conn_second)
        .unwrap()
        .query_all()
        .unwrap();

    assert_eq!(first_rows, second_rows);
}

#[test]
fn catalogue_changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.sqlite3");

    {
        let (conn, _) = open_db(&path).unwrap();
        let repo = SqliteBookRepository::try_new(&conn).unwrap();
        repo.insert(&BookRecord::new(1234, "T", "A", 5)).unwrap();
        repo.delete(3001).unwrap();
    }

    let (conn, status) = open_db(&path).unwrap();
    assert_eq!(status, SeedStatus::AlreadyPresent);
    let ids: Vec<_> = SqliteBookRepository::try_new(&conn)
        .unwrap()
        .query_all()
        .unwrap()
        .into_iter()
        .map(|book| book.id)
        .collect();
    assert_eq!(ids, vec![1234, 3002, 3003, 3004, 3005]);
}

#[test]
fn existing_empty_table_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE ebookstore (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            qty INTEGER NOT NULL
        );",
    )
    .unwrap();
    drop(conn);

    let (conn, status) = open_db(&path).unwrap();
    assert_eq!(status, SeedStatus::AlreadyPresent);
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert!(repo.query_all().unwrap().is_empty());
}

#[test]
fn open_db_in_missing_directory_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("ebookstore.sqlite3");

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::StorageUnavailable { location, .. } => assert_eq!(location, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_db_on_non_database_file_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.sqlite3");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(err, DbError::StorageUnavailable { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn seeding_conflict_is_reported_and_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    let conflicting = vec![
        BookRecord::new(3001, "first", "a", 1),
        BookRecord::new(3002, "second", "b", 2),
        BookRecord::new(3001, "again", "c", 3),
    ];

    let status = ensure_catalogue_with(&mut conn, &conflicting).unwrap();
    match status {
        SeedStatus::Aborted { reason } => assert!(reason.contains("3001")),
        other => panic!("unexpected status: {other:?}"),
    }

    assert_table_exists(&conn, CATALOGUE_TABLE);
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert!(repo.query_all().unwrap().is_empty());

    let status = ensure_catalogue_with(&mut conn, &seed_books()).unwrap();
    assert_eq!(status, SeedStatus::AlreadyPresent);
}

#[test]
fn seed_catalogue_surfaces_integrity_violation() {
    let (mut conn, _) = open_db_in_memory().unwrap();

    let err = seed_catalogue(&mut conn, &seed_books()).unwrap_err();
    assert!(matches!(err, DbError::IntegrityViolation(_)));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert_eq!(repo.query_all().unwrap().len(), 5);
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
