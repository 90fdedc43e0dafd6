//! Local UI chrome state (theme, transient notices).
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of the session and library state so pages
//! can report outcomes without touching authentication.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown by the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub seq: u64,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
    pub notice: Option<Notice>,
    pub notice_seq: u64,
}

impl UiState {
    /// Replace the current notice and return its sequence number.
    pub fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.notice_seq += 1;
        self.notice = Some(Notice { kind, message: message.into(), seq: self.notice_seq });
        self.notice_seq
    }

    /// Clear the notice only if it is still the one numbered `seq`.
    pub fn dismiss_notice(&mut self, seq: u64) {
        if self.notice.as_ref().is_some_and(|n| n.seq == seq) {
            self.notice = None;
        }
    }
}
