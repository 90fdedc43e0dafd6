//! Book-list state for the dashboard.
//!
//! DESIGN
//! ======
//! Library inventory is independent of the session: failures here become
//! notices and never sign the user out.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use crate::net::types::Book;

#[derive(Clone, Debug, Default)]
pub struct LibraryState {
    pub items: Vec<Book>,
    pub loading: bool,
    pub error: Option<String>,
    /// Book awaiting delete confirmation.
    pub pending_delete: Option<Book>,
    pub deleting: bool,
}

impl LibraryState {
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, items: Vec<Book>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn remove(&mut self, book_id: i64) {
        self.items.retain(|b| b.id != book_id);
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }
}
