//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the application chrome and list items while reading
//! shared state from Leptos context providers.

pub mod book_card;
pub mod confirm_dialog;
pub mod footer;
pub mod main_layout;
pub mod notice;
pub mod route_guard;
pub mod theme_toggle;
