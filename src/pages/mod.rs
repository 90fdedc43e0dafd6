//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control lives in the route guard wrapped around
//! each page in `app`, never in the pages themselves.

pub mod bookmarks;
pub mod dashboard;
pub mod info;
pub mod landing;
pub mod login;
pub mod read;
pub mod upload;

use crate::state::auth::BrowserSession;

/// Bearer token for a request, read without subscribing.
pub(crate) fn current_token(session: &BrowserSession) -> Option<String> {
    session.snapshot().token().map(str::to_owned)
}
