use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_dark_mode_off() {
    let state = UiState::default();
    assert!(!state.dark_mode);
}

#[test]
fn ui_state_default_has_no_notice() {
    let state = UiState::default();
    assert!(state.notice.is_none());
    assert_eq!(state.notice_seq, 0);
}

// =============================================================
// Notices
// =============================================================

#[test]
fn push_notice_replaces_previous() {
    let mut state = UiState::default();
    state.push_notice(NoticeKind::Error, "Failed to download book");
    let seq = state.push_notice(NoticeKind::Success, "Book deleted successfully");
    let notice = state.notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Book deleted successfully");
    assert_eq!(notice.seq, seq);
}

#[test]
fn dismiss_notice_ignores_outdated_seq() {
    let mut state = UiState::default();
    let first = state.push_notice(NoticeKind::Error, "first");
    let second = state.push_notice(NoticeKind::Error, "second");
    state.dismiss_notice(first);
    assert_eq!(state.notice.as_ref().map(|n| n.seq), Some(second));
    state.dismiss_notice(second);
    assert!(state.notice.is_none());
}
