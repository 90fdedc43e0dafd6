//! Wire DTOs for the Boimarker REST backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON schema so serde round-trips stay
//! lossless; ids are integers on the wire.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Email + password pair submitted to `/login` and `/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

// Hand-written so passwords never reach logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// A book in the signed-in user's library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub mimetype: String,
    #[serde(default)]
    pub owner_id: i64,
}

impl Book {
    pub fn is_pdf(&self) -> bool {
        self.mimetype.to_ascii_lowercase().contains("pdf") || self.filename.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Saved reading position for one book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub book_id: i64,
    pub user_id: i64,
    pub position: String,
}

/// Body for `POST /books/{id}/progress`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate<'a> {
    pub position: &'a str,
}
