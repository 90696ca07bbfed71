use bookstore_core::db::open_db_in_memory;
use bookstore_core::{
    BookFilter, BookRecord, BookRepository, BookValidationError, RepoError, SqliteBookRepository,
};
use rusqlite::Connection;

#[test]
fn insert_then_query_by_id_roundtrip() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let book = BookRecord::new(1234, "Dune", "Frank Herbert", 7);
    let id = repo.insert(&book).unwrap();

    assert_eq!(id, 1234);
    assert_eq!(repo.query_by(BookFilter::Id(1234)).unwrap(), vec![book]);
}

#[test]
fn insert_duplicate_id_returns_duplicate_key_and_keeps_original() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let before = repo.query_all().unwrap();

    let err = repo
        .insert(&BookRecord::new(3001, "Impostor", "Nobody", 1))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateKey(3001)));
    assert_eq!(repo.query_all().unwrap(), before);
}

#[test]
fn insert_rejects_negative_quantity() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let err = repo
        .insert(&BookRecord::new(1234, "t", "a", -1))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(BookValidationError::InvalidQuantity(_))
    ));
    assert!(repo.query_by(BookFilter::Id(1234)).unwrap().is_empty());
}

#[test]
fn update_overwrites_mutable_fields() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let changed = repo
        .update(&BookRecord::new(3005, "Alice's Adventures", "Lewis Carroll", 13))
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(
        repo.query_by(BookFilter::Id(3005)).unwrap(),
        vec![BookRecord::new(3005, "Alice's Adventures", "Lewis Carroll", 13)]
    );
}

#[test]
fn update_and_delete_missing_id_affect_zero_rows() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let before = repo.query_all().unwrap();

    assert_eq!(repo.update(&BookRecord::new(9999, "t", "a", 1)).unwrap(), 0);
    assert_eq!(repo.delete(9999).unwrap(), 0);
    assert_eq!(repo.query_all().unwrap(), before);
}

#[test]
fn delete_removes_exactly_one_record() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    assert_eq!(repo.delete(3003).unwrap(), 1);

    let ids: Vec<_> = repo.query_all().unwrap().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![3001, 3002, 3004, 3005]);
}

#[test]
fn query_by_text_fields_is_exact_and_case_sensitive() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let hits = repo.query_by(BookFilter::Author("Lewis Carrol")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 3005);

    assert!(repo.query_by(BookFilter::Author("lewis carrol")).unwrap().is_empty());
    assert!(repo.query_by(BookFilter::Title("The Lord")).unwrap().is_empty());
}

#[test]
fn query_by_quantity_returns_all_matches_in_storage_order() {
    let (conn, _) = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    repo.insert(&BookRecord::new(1000, "Early", "X", 30)).unwrap();
    repo.insert(&BookRecord::new(4000, "Late", "Y", 30)).unwrap();

    let ids: Vec<_> = repo
        .query_by(BookFilter::Quantity(30))
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![1000, 3001, 4000]);
}

#[test]
fn query_rejects_non_integer_quantity_rows() {
    let (conn, _) = open_db_in_memory().unwrap();
    conn.execute(
        "UPDATE ebookstore SET qty = 'default_book_quantity' WHERE id = 3002;",
        [],
    )
    .unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    let err = repo.query_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_connection_without_catalogue_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteBookRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("ebookstore"))
    ));
}
