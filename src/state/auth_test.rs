use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::net::types::TokenResponse;
use crate::util::token_store::MemoryTokenStore;

// =============================================================
// Scripted backend
// =============================================================

type LoginResult = Result<TokenResponse, ApiError>;

enum Reply {
    Ready(LoginResult),
    Deferred(oneshot::Receiver<LoginResult>),
}

#[derive(Default)]
struct StubBackend {
    logins: Mutex<VecDeque<Reply>>,
    registers: Mutex<VecDeque<Result<(), ApiError>>>,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
}

impl StubBackend {
    fn with_login(result: LoginResult) -> Self {
        let stub = Self::default();
        stub.logins.lock().unwrap().push_back(Reply::Ready(result));
        stub
    }

    fn with_register(result: Result<(), ApiError>) -> Self {
        let stub = Self::default();
        stub.registers.lock().unwrap().push_back(result);
        stub
    }

    fn defer_login(&self) -> oneshot::Sender<LoginResult> {
        let (tx, rx) = oneshot::channel();
        self.logins.lock().unwrap().push_back(Reply::Deferred(rx));
        tx
    }

    fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }
}

impl AuthBackend for StubBackend {
    async fn login(&self, _credentials: &Credentials) -> LoginResult {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.logins.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".to_owned()))),
            None => Err(ApiError::Network("no scripted reply".to_owned())),
        }
    }

    async fn register(&self, _credentials: &Credentials) -> Result<(), ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.registers.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_owned())))
    }
}

fn token(value: &str) -> LoginResult {
    Ok(TokenResponse { access_token: value.to_owned(), token_type: "bearer".to_owned() })
}

fn creds() -> Credentials {
    Credentials::new("a@b.com", "pw")
}

/// Store that holds a token but refuses every write, like blocked localStorage.
#[derive(Default)]
struct ReadOnlyStore {
    token: Option<String>,
}

impl TokenStore for ReadOnlyStore {
    fn read(&self) -> Option<String> {
        self.token.clone()
    }

    fn write(&self, _token: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn clear(&self) {}

    fn read_identity(&self) -> Option<String> {
        None
    }

    fn write_identity(&self, _identity: Option<&str>) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

fn session_with(store: Arc<MemoryTokenStore>, backend: StubBackend) -> AuthSession<Arc<MemoryTokenStore>, StubBackend> {
    AuthSession::new(store, backend)
}

// =============================================================
// restore
// =============================================================

#[test]
fn new_session_starts_loading() {
    let session = session_with(Arc::default(), StubBackend::default());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status(), SessionStatus::Loading);
    assert_eq!(snapshot.token(), None);
}

#[test]
fn restore_without_token_becomes_anonymous() {
    let session = session_with(Arc::default(), StubBackend::default());
    assert!(session.restore());
    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
}

#[test]
fn restore_with_token_becomes_authenticated_without_network() {
    let store = Arc::new(MemoryTokenStore::with_token("T1", Some("a@b.com")));
    let session = session_with(store, StubBackend::default());
    assert!(session.restore());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status(), SessionStatus::Authenticated);
    assert_eq!(snapshot.token(), Some("T1"));
    assert_eq!(snapshot.identity(), Some("a@b.com"));
    assert_eq!(session.backend().login_calls(), 0);
}

#[test]
fn restore_transitions_out_of_loading_exactly_once() {
    let store = Arc::new(MemoryTokenStore::default());
    let session = session_with(store.clone(), StubBackend::default());
    assert!(session.restore());

    store.write("late").unwrap();
    for _ in 0..3 {
        assert!(!session.restore());
    }
    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
    assert_eq!(session.snapshot().token(), None);
}

#[test]
fn restore_after_login_is_noop() {
    let session = session_with(Arc::default(), StubBackend::with_login(token("T1")));
    block_on(session.login(creds())).unwrap();
    assert!(!session.restore());
    assert_eq!(session.snapshot().token(), Some("T1"));
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_persists_token_and_authenticates() {
    let store = Arc::new(MemoryTokenStore::default());
    let session = session_with(store.clone(), StubBackend::with_login(token("T1")));
    session.restore();

    block_on(session.login(creds())).unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status(), SessionStatus::Authenticated);
    assert_eq!(snapshot.token(), Some("T1"));
    assert_eq!(snapshot.identity(), Some("a@b.com"));
    assert_eq!(store.read().as_deref(), Some("T1"));
    assert_eq!(store.read_identity().as_deref(), Some("a@b.com"));
}

#[test]
fn login_then_fresh_restore_reuses_persisted_token() {
    let store = Arc::new(MemoryTokenStore::default());
    let first = session_with(store.clone(), StubBackend::with_login(token("T1")));
    first.restore();
    block_on(first.login(creds())).unwrap();

    let second = session_with(store, StubBackend::default());
    assert!(second.restore());
    assert_eq!(second.snapshot().token(), Some("T1"));
    assert_eq!(second.snapshot().status(), SessionStatus::Authenticated);
    assert_eq!(second.backend().login_calls(), 0);
}

#[test]
fn login_unauthorized_leaves_session_and_store_unchanged() {
    let store = Arc::new(MemoryTokenStore::default());
    let rejected = Err(ApiError::from_status(401, r#"{"detail":"Invalid credentials"}"#));
    let session = session_with(store.clone(), StubBackend::with_login(rejected));
    session.restore();

    let err = block_on(session.login(creds())).unwrap_err();

    assert_eq!(err, AuthError::Rejected { status: 401, detail: "Invalid credentials".to_owned() });
    assert_eq!(err.to_string(), "authentication failed: Invalid credentials");
    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
    assert_eq!(session.snapshot().token(), None);
    assert_eq!(store.read(), None);
}

#[test]
fn login_storage_failure_leaves_session_unchanged() {
    let session = AuthSession::new(ReadOnlyStore::default(), StubBackend::with_login(token("T1")));
    session.restore();

    let err = block_on(session.login(creds())).unwrap_err();

    assert_eq!(err, AuthError::Storage(StorageError::Unavailable));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status(), SessionStatus::Anonymous);
    assert_eq!(snapshot.token(), None);
    assert_eq!(snapshot.identity(), None);
}

#[test]
fn login_storage_failure_keeps_restored_session() {
    let store = ReadOnlyStore { token: Some("OLD".to_owned()) };
    let session = AuthSession::new(store, StubBackend::with_login(token("T2")));
    session.restore();

    let err = block_on(session.login(creds())).unwrap_err();

    assert!(matches!(err, AuthError::Storage(_)));
    assert_eq!(session.snapshot().status(), SessionStatus::Authenticated);
    assert_eq!(session.snapshot().token(), Some("OLD"));
}

#[test]
fn login_failure_keeps_previous_authenticated_session() {
    let store = Arc::new(MemoryTokenStore::with_token("OLD", Some("old@b.com")));
    let session = session_with(store.clone(), StubBackend::with_login(Err(ApiError::Timeout)));
    session.restore();

    let err = block_on(session.login(creds())).unwrap_err();

    assert_eq!(err, AuthError::Unavailable);
    assert_eq!(session.snapshot().token(), Some("OLD"));
    assert_eq!(session.snapshot().identity(), Some("old@b.com"));
    assert_eq!(store.read().as_deref(), Some("OLD"));
}

#[test]
fn login_network_failure_is_generic() {
    let session = session_with(Arc::default(), StubBackend::with_login(Err(ApiError::Network("refused".to_owned()))));
    session.restore();
    assert_eq!(block_on(session.login(creds())), Err(AuthError::Unavailable));
}

#[test]
fn login_unparseable_server_error_is_generic() {
    let failure = Err(ApiError::from_status(502, "<html>Bad Gateway</html>"));
    let session = session_with(Arc::default(), StubBackend::with_login(failure));
    session.restore();
    assert_eq!(block_on(session.login(creds())), Err(AuthError::Unavailable));
}

#[test]
fn login_with_empty_token_does_not_authenticate() {
    let store = Arc::new(MemoryTokenStore::default());
    let session = session_with(store.clone(), StubBackend::with_login(token("")));
    session.restore();

    assert_eq!(block_on(session.login(creds())), Err(AuthError::Unavailable));
    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
    assert_eq!(store.read(), None);
}

// =============================================================
// register
// =============================================================

#[test]
fn register_success_does_not_authenticate() {
    let store = Arc::new(MemoryTokenStore::default());
    let session = session_with(store.clone(), StubBackend::with_register(Ok(())));
    session.restore();

    block_on(session.register(&creds())).unwrap();

    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
    assert_eq!(store.read(), None);
    assert_eq!(session.backend().login_calls(), 0);
}

#[test]
fn register_failure_surfaces_server_detail() {
    let failure = Err(ApiError::from_status(400, r#"{"detail":"Email already registered"}"#));
    let session = session_with(Arc::default(), StubBackend::with_register(failure));
    session.restore();

    let err = block_on(session.register(&creds())).unwrap_err();
    assert_eq!(err, AuthError::Rejected { status: 400, detail: "Email already registered".to_owned() });
    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_store_and_session() {
    let store = Arc::new(MemoryTokenStore::with_token("T1", Some("a@b.com")));
    let session = session_with(store.clone(), StubBackend::default());
    session.restore();

    session.logout();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status(), SessionStatus::Anonymous);
    assert_eq!(snapshot.token(), None);
    assert_eq!(snapshot.identity(), None);
    assert_eq!(store.read(), None);
    assert_eq!(store.read_identity(), None);
}

#[test]
fn logout_when_already_anonymous_is_safe() {
    let store = Arc::new(MemoryTokenStore::default());
    let session = session_with(store.clone(), StubBackend::default());
    session.restore();

    session.logout();
    session.logout();

    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
    assert_eq!(store.read(), None);
}

#[test]
fn clones_share_session_state() {
    let session = session_with(Arc::default(), StubBackend::with_login(token("T1")));
    let other = session.clone();
    session.restore();
    block_on(other.login(creds())).unwrap();
    assert_eq!(session.snapshot().token(), Some("T1"));
}

// =============================================================
// overlapping calls
// =============================================================

#[test]
fn login_resolving_after_logout_is_discarded() {
    let store = Arc::new(MemoryTokenStore::default());
    let backend = StubBackend::default();
    let reply = backend.defer_login();
    let session = session_with(store.clone(), backend);
    session.restore();

    let mut pool = LocalPool::new();
    let pending = {
        let session = session.clone();
        pool.spawner()
            .spawn_local_with_handle(async move { session.login(creds()).await })
            .unwrap()
    };
    pool.run_until_stalled();
    assert_eq!(session.backend().login_calls(), 1);

    session.logout();
    reply.send(token("LATE")).unwrap();
    let result = pool.run_until(pending);

    assert_eq!(result, Err(AuthError::Superseded));
    assert_eq!(session.snapshot().status(), SessionStatus::Anonymous);
    assert_eq!(session.snapshot().token(), None);
    assert_eq!(store.read(), None);
}

#[test]
fn later_login_wins_over_earlier_slow_login() {
    let store = Arc::new(MemoryTokenStore::default());
    let backend = StubBackend::default();
    let first_reply = backend.defer_login();
    let second_reply = backend.defer_login();
    let session = session_with(store.clone(), backend);
    session.restore();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let first = {
        let session = session.clone();
        spawner.spawn_local_with_handle(async move { session.login(creds()).await }).unwrap()
    };
    pool.run_until_stalled();
    let second = {
        let session = session.clone();
        spawner.spawn_local_with_handle(async move { session.login(creds()).await }).unwrap()
    };
    pool.run_until_stalled();

    second_reply.send(token("NEW")).unwrap();
    assert_eq!(pool.run_until(second), Ok(()));
    first_reply.send(token("OLD")).unwrap();
    assert_eq!(pool.run_until(first), Err(AuthError::Superseded));

    assert_eq!(session.snapshot().token(), Some("NEW"));
    assert_eq!(store.read().as_deref(), Some("NEW"));
}

#[test]
fn earlier_login_settling_first_is_replaced_by_later_one() {
    let store = Arc::new(MemoryTokenStore::default());
    let backend = StubBackend::default();
    let first_reply = backend.defer_login();
    let second_reply = backend.defer_login();
    let session = session_with(store.clone(), backend);
    session.restore();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let first = {
        let session = session.clone();
        spawner.spawn_local_with_handle(async move { session.login(creds()).await }).unwrap()
    };
    pool.run_until_stalled();
    let second = {
        let session = session.clone();
        spawner.spawn_local_with_handle(async move { session.login(creds()).await }).unwrap()
    };
    pool.run_until_stalled();

    first_reply.send(token("OLD")).unwrap();
    assert_eq!(pool.run_until(first), Ok(()));
    second_reply.send(token("NEW")).unwrap();
    assert_eq!(pool.run_until(second), Ok(()));

    assert_eq!(session.snapshot().token(), Some("NEW"));
    assert_eq!(store.read().as_deref(), Some("NEW"));
}

#[test]
fn failed_later_login_does_not_block_earlier_success() {
    let backend = StubBackend::default();
    let first_reply = backend.defer_login();
    let second_reply = backend.defer_login();
    let session = session_with(Arc::default(), backend);
    session.restore();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let first = {
        let session = session.clone();
        spawner.spawn_local_with_handle(async move { session.login(creds()).await }).unwrap()
    };
    pool.run_until_stalled();
    let second = {
        let session = session.clone();
        spawner.spawn_local_with_handle(async move { session.login(creds()).await }).unwrap()
    };
    pool.run_until_stalled();

    second_reply.send(Err(ApiError::Timeout)).unwrap();
    assert_eq!(pool.run_until(second), Err(AuthError::Unavailable));
    first_reply.send(token("T1")).unwrap();
    assert_eq!(pool.run_until(first), Ok(()));
    assert_eq!(session.snapshot().token(), Some("T1"));
}

// =============================================================
// AuthError mapping
// =============================================================

#[test]
fn auth_error_from_api_error_distinguishes_parsed_responses() {
    assert_eq!(
        AuthError::from(ApiError::Unauthorized { status: 403, detail: None }),
        AuthError::Rejected { status: 403, detail: "invalid credentials".to_owned() }
    );
    assert_eq!(AuthError::from(ApiError::Decode("bad json".to_owned())), AuthError::Unavailable);
    assert_eq!(
        AuthError::from(ApiError::Server { status: 500, detail: None }),
        AuthError::Unavailable
    );
}
