//! Networking modules for the Boimarker REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls, `error` classifies failures, and `types` defines
//! the wire schema shared with the backend.

pub mod api;
pub mod error;
pub mod types;
