use bookstore_core::{parse_book_id, BookRecord, BookValidationError, DEFAULT_TITLE};

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = BookRecord::new(3004, "The Lord of the Rings", "J.R.R Tolkien", 37);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 3004);
    assert_eq!(json["title"], "The Lord of the Rings");
    assert_eq!(json["author"], "J.R.R Tolkien");
    assert_eq!(json["quantity"], 37);

    let decoded: BookRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn with_defaults_keeps_provided_values_and_fills_blanks() {
    let book = BookRecord::with_defaults(1234, Some("   "), Some("Ursula K. Le Guin"), Some(3));

    assert_eq!(book.id, 1234);
    assert_eq!(book.title, DEFAULT_TITLE);
    assert_eq!(book.author, "Ursula K. Le Guin");
    assert_eq!(book.quantity, 3);
}

#[test]
fn parse_book_id_error_names_the_rejected_input() {
    let err = parse_book_id("12a").unwrap_err();
    assert_eq!(err, BookValidationError::InvalidId("12a".to_string()));
    assert!(err.to_string().contains("exactly 4 digits"));
}
