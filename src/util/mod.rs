//! Browser-facing helpers shared by pages and components.

pub mod browser;
pub mod dark_mode;
pub mod route_guard;
pub mod token_store;
