use super::*;

fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        title: title.to_owned(),
        filename: format!("{id}.pdf"),
        mimetype: "application/pdf".to_owned(),
        owner_id: 1,
    }
}

#[test]
fn library_state_default_is_idle() {
    let state = LibraryState::default();
    assert!(state.items.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.pending_delete.is_none());
}

#[test]
fn start_loading_clears_previous_error() {
    let mut state = LibraryState::default();
    state.failed("Failed to fetch books");
    state.start_loading();
    assert!(state.loading);
    assert!(state.error.is_none());
}

#[test]
fn loaded_replaces_items() {
    let mut state = LibraryState::default();
    state.start_loading();
    state.loaded(vec![book(1, "Dune"), book(2, "Emma")]);
    assert!(!state.loading);
    assert_eq!(state.items.len(), 2);
    assert!(!state.is_empty());
}

#[test]
fn remove_drops_only_matching_book() {
    let mut state = LibraryState::default();
    state.loaded(vec![book(1, "Dune"), book(2, "Emma")]);
    state.remove(1);
    assert_eq!(state.items, vec![book(2, "Emma")]);
}

#[test]
fn is_empty_only_after_successful_empty_load() {
    let mut state = LibraryState::default();
    state.start_loading();
    assert!(!state.is_empty());
    state.failed("down");
    assert!(!state.is_empty());
    state.loaded(Vec::new());
    assert!(state.is_empty());
}
