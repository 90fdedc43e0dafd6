use super::*;

#[test]
fn token_response_defaults_token_type() {
    let parsed: TokenResponse = serde_json::from_str(r#"{"access_token":"T1"}"#).unwrap();
    assert_eq!(parsed.access_token, "T1");
    assert_eq!(parsed.token_type, "bearer");
}

#[test]
fn book_parses_backend_shape() {
    let raw = r#"{"id":7,"title":"Dune","filename":"dune.pdf","mimetype":"application/pdf","owner_id":3}"#;
    let book: Book = serde_json::from_str(raw).unwrap();
    assert_eq!(book.id, 7);
    assert_eq!(book.owner_id, 3);
    assert!(book.is_pdf());
}

#[test]
fn book_tolerates_missing_optional_fields() {
    let book: Book = serde_json::from_str(r#"{"id":1,"title":"Notes"}"#).unwrap();
    assert_eq!(book.filename, "");
    assert!(!book.is_pdf());
}

#[test]
fn book_is_pdf_falls_back_to_extension() {
    let book = Book {
        id: 1,
        title: "Scan".to_owned(),
        filename: "SCAN.PDF".to_owned(),
        mimetype: "application/octet-stream".to_owned(),
        owner_id: 1,
    };
    assert!(book.is_pdf());
}

#[test]
fn progress_update_serializes_position() {
    let body = serde_json::to_value(ProgressUpdate { position: "12" }).unwrap();
    assert_eq!(body, serde_json::json!({ "position": "12" }));
}

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials::new("a@b.com", "hunter2");
    let shown = format!("{creds:?}");
    assert!(shown.contains("a@b.com"));
    assert!(!shown.contains("hunter2"));
}
