//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one [`AuthSession`] and provides it via context. Route guards
//! read its status to coordinate redirects, and pages read its token for
//! `Authorization` headers. It is the only writer of the token store.
//!
//! ORDERING
//! ========
//! Every `login` and `logout` takes a ticket from a monotonically increasing
//! counter before it suspends. The session remembers the ticket of the call
//! that last settled it; a login that resumes with an older ticket is stale
//! and its result is dropped, so a slow login can never undo a later logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;

use crate::net::api::{ApiClient, AuthBackend};
use crate::net::error::ApiError;
use crate::net::types::Credentials;
use crate::util::token_store::{LocalStorageTokenStore, StorageError, TokenStore};

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Persisted token not read yet. Only ever the initial state.
    #[default]
    Loading,
    Authenticated,
    Anonymous,
}

/// In-memory session. `status == Authenticated` iff a non-empty token is held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    identity: Option<String>,
    status: SessionStatus,
    settled_seq: u64,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Display identity (the email used to log in), when known.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    fn is_stale(&self, seq: u64) -> bool {
        seq < self.settled_seq
    }

    /// Apply the one-time restoration read. Returns `false` once settled.
    fn restore(&mut self, token: Option<String>, identity: Option<String>) -> bool {
        if self.status != SessionStatus::Loading {
            return false;
        }
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.token = Some(token);
                self.identity = identity;
                self.status = SessionStatus::Authenticated;
            }
            None => {
                self.token = None;
                self.identity = None;
                self.status = SessionStatus::Anonymous;
            }
        }
        true
    }

    fn authenticate(&mut self, seq: u64, token: String, identity: Option<String>) {
        self.token = Some(token);
        self.identity = identity;
        self.status = SessionStatus::Authenticated;
        self.settled_seq = self.settled_seq.max(seq);
    }

    fn sign_out(&mut self, seq: u64) {
        self.token = None;
        self.identity = None;
        self.status = SessionStatus::Anonymous;
        self.settled_seq = self.settled_seq.max(seq);
    }
}

/// Failure surfaced by [`AuthSession::login`] and [`AuthSession::register`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend answered and refused; carries its status and message.
    #[error("authentication failed: {detail}")]
    Rejected { status: u16, detail: String },

    /// No usable answer (unreachable, timed out, or unparseable).
    #[error("authentication failed")]
    Unavailable,

    #[error("could not save session: {0}")]
    Storage(#[from] StorageError),

    /// A later login or logout settled the session first.
    #[error("superseded by a newer session change")]
    Superseded,
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(status) if err.has_response() => Self::Rejected {
                status,
                detail: err.detail().map_or_else(|| err.to_string(), str::to_owned),
            },
            _ => Self::Unavailable,
        }
    }
}

/// Session manager: reactive session state plus its persistence and backend.
///
/// Clones share the same state.
pub struct AuthSession<S = LocalStorageTokenStore, B = ApiClient> {
    state: ArcRwSignal<Session>,
    store: Arc<S>,
    backend: Arc<B>,
    next_seq: Arc<AtomicU64>,
}

impl<S, B> Clone for AuthSession<S, B> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            store: Arc::clone(&self.store),
            backend: Arc::clone(&self.backend),
            next_seq: Arc::clone(&self.next_seq),
        }
    }
}

impl<S, B> AuthSession<S, B>
where
    S: TokenStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    /// New session in [`SessionStatus::Loading`]; call [`Self::restore`] next.
    pub fn new(store: S, backend: B) -> Self {
        Self {
            state: ArcRwSignal::new(Session::default()),
            store: Arc::new(store),
            backend: Arc::new(backend),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current session, tracked by the reactive graph.
    pub fn session(&self) -> Session {
        self.state.get()
    }

    /// Current session without subscribing.
    pub fn snapshot(&self) -> Session {
        self.state.get_untracked()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.with(|s| s.status)
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    pub fn identity(&self) -> Option<String> {
        self.state.with(|s| s.identity.clone())
    }

    fn issue_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Reconcile with the token store. Only the first call does anything;
    /// returns whether this call moved the session out of `Loading`.
    pub fn restore(&self) -> bool {
        if self.state.with_untracked(|s| s.status != SessionStatus::Loading) {
            return false;
        }
        let token = self.store.read();
        let identity = token.as_ref().and_then(|_| self.store.read_identity());
        let restored = token.is_some();
        self.state.update(|s| {
            s.restore(token, identity);
        });
        log::info!("session restored (authenticated={restored})");
        true
    }

    /// Log in with `credentials`, persisting the token before the session
    /// flips to authenticated.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the backend refuses or cannot be reached,
    /// when the token cannot be persisted, or when a later login or logout
    /// settled first. The session and store are unchanged in every error case.
    pub async fn login(&self, credentials: Credentials) -> Result<(), AuthError> {
        let seq = self.issue_seq();
        let identity = credentials.email.trim().to_owned();

        let response = match self.backend.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("login failed: {e}");
                return Err(e.into());
            }
        };
        if response.access_token.is_empty() {
            log::warn!("login response carried an empty token");
            return Err(AuthError::Unavailable);
        }
        if self.state.with_untracked(|s| s.is_stale(seq)) {
            log::info!("discarding stale login result (seq {seq})");
            return Err(AuthError::Superseded);
        }

        self.store.write(&response.access_token)?;
        let identity = (!identity.is_empty()).then_some(identity);
        if let Err(e) = self.store.write_identity(identity.as_deref()) {
            log::warn!("identity not persisted: {e}");
        }
        self.state.update(|s| s.authenticate(seq, response.access_token, identity));
        log::info!("session authenticated");
        Ok(())
    }

    /// Create an account. Never changes the session; chain into
    /// [`Self::login`] to sign in.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the backend refuses or cannot be reached.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.backend.register(credentials).await.map_err(|e| {
            log::warn!("registration failed: {e}");
            AuthError::from(e)
        })
    }

    /// Clear the store, then the session. Safe when already anonymous.
    pub fn logout(&self) {
        let seq = self.issue_seq();
        self.store.clear();
        self.state.update(|s| s.sign_out(seq));
        log::info!("session cleared");
    }
}

/// Session type provided by `App` in the browser.
pub type BrowserSession = AuthSession<LocalStorageTokenStore, ApiClient>;
