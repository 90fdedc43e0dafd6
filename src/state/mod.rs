//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `library`, `bookmarks`, `ui`) so
//! individual pages can depend on small focused models.

pub mod auth;
pub mod bookmarks;
pub mod library;
pub mod ui;
