use super::*;

#[test]
fn parse_book_id_accepts_positive_integers() {
    assert_eq!(parse_book_id("42"), Some(42));
    assert_eq!(parse_book_id(" 7 "), Some(7));
}

#[test]
fn parse_book_id_rejects_garbage() {
    assert_eq!(parse_book_id("abc"), None);
    assert_eq!(parse_book_id("0"), None);
    assert_eq!(parse_book_id("-3"), None);
    assert_eq!(parse_book_id(""), None);
}

#[test]
fn normalize_position_requires_page_number() {
    assert_eq!(normalize_position(" 12 "), Some("12".to_owned()));
    assert_eq!(normalize_position("manual"), None);
    assert_eq!(normalize_position("0"), None);
}

#[test]
fn pdf_src_appends_known_page() {
    assert_eq!(
        pdf_src("blob:http://x/1", Some("5")),
        "blob:http://x/1#toolbar=1&navpanes=1&scrollbar=1&page=5"
    );
}

#[test]
fn pdf_src_omits_unknown_page() {
    assert_eq!(pdf_src("blob:u", None), "blob:u#toolbar=1&navpanes=1&scrollbar=1");
    assert_eq!(pdf_src("blob:u", Some("manual")), "blob:u#toolbar=1&navpanes=1&scrollbar=1");
}

fn sample_book() -> Book {
    Book {
        id: 3,
        title: "Dune".to_owned(),
        filename: "dune.pdf".to_owned(),
        mimetype: "application/pdf".to_owned(),
        owner_id: 1,
    }
}

#[test]
fn attach_file_stores_url_on_live_page() {
    let reader = RwSignal::new(ReaderState { loading: true, ..ReaderState::default() });

    assert_eq!(attach_file(reader, sample_book(), "blob:live".to_owned()), Ok(()));

    let state = reader.get_untracked();
    assert_eq!(state.file_url.as_deref(), Some("blob:live"));
    assert_eq!(state.book.map(|b| b.id), Some(3));
    assert!(!state.loading);
}

#[test]
fn attach_file_returns_url_after_page_is_gone() {
    let reader = RwSignal::new(ReaderState { loading: true, ..ReaderState::default() });
    reader.dispose();

    assert_eq!(attach_file(reader, sample_book(), "blob:orphan".to_owned()), Err("blob:orphan".to_owned()));
}
