//! REST API helpers for communicating with the Boimarker backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each raced against
//! the configured request timeout.
//! Server-side (SSR) and native tests: stubs returning
//! [`ApiError::Network`], since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-2xx responses are classified
//! by [`ApiError::from_status`]; callers decide how to present them.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use futures::future::{Either, select};

use super::error::ApiError;
use super::types::{Book, Credentials, Progress, TokenResponse};
#[cfg(feature = "hydrate")]
use super::types::ProgressUpdate;
use crate::config::ApiConfig;
#[cfg(any(test, feature = "hydrate"))]
use crate::config::LoginMode;

/// Backend operations the session manager depends on.
///
/// Implemented by [`ApiClient`] for the real backend and by scripted stubs in
/// tests.
pub trait AuthBackend {
    /// Exchange credentials for an access token.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<TokenResponse, ApiError>>;

    /// Create an account. Success carries no session.
    fn register(&self, credentials: &Credentials) -> impl Future<Output = Result<(), ApiError>>;
}

/// Downloaded book file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// HTTP client bound to one backend base URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiClient {
    config: ApiConfig,
}

#[cfg(any(test, feature = "hydrate"))]
fn register_endpoint() -> &'static str {
    "/register"
}

#[cfg(any(test, feature = "hydrate"))]
fn login_endpoint(mode: LoginMode) -> &'static str {
    match mode {
        LoginMode::Json => "/login",
        LoginMode::Form => "/token",
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn books_endpoint() -> &'static str {
    "/books"
}

#[cfg(any(test, feature = "hydrate"))]
fn upload_endpoint() -> &'static str {
    "/books/upload"
}

#[cfg(any(test, feature = "hydrate"))]
fn book_endpoint(book_id: i64) -> String {
    format!("/books/{book_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn download_endpoint(book_id: i64) -> String {
    format!("/books/{book_id}/download")
}

#[cfg(any(test, feature = "hydrate"))]
fn progress_endpoint(book_id: i64) -> String {
    format!("/books/{book_id}/progress")
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Form-encoded body for the `/token` login variant.
#[cfg(any(test, feature = "hydrate"))]
fn login_form_body(credentials: &Credentials) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(&credentials.email),
        urlencoding::encode(&credentials.password)
    )
}

/// Filename from a `content-disposition` header, or `book_{id}.pdf`.
pub fn download_filename(content_disposition: Option<&str>, book_id: i64) -> String {
    content_disposition
        .and_then(|header| {
            header.split(';').map(str::trim).find_map(|part| {
                let (name, value) = part.split_once('=')?;
                if !name.trim().eq_ignore_ascii_case("filename") {
                    return None;
                }
                let value = value.trim().trim_matches('"');
                (!value.is_empty()).then(|| value.to_owned())
            })
        })
        .unwrap_or_else(|| format!("book_{book_id}.pdf"))
}

/// Resolve `request`, or fail with [`ApiError::Timeout`] once `deadline` fires.
pub async fn race_timeout<F, D, T>(request: F, deadline: D) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
{
    let request = std::pin::pin!(request);
    let deadline = std::pin::pin!(deadline);
    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

/// Run `send`, then `read` on its response, under a single `deadline`.
///
/// The deadline covers reading the body, so a backend that answers with
/// headers and then stalls still fails with [`ApiError::Timeout`].
pub async fn within_deadline<S, R, RF, Resp, T, D>(send: S, read: R, deadline: D) -> Result<T, ApiError>
where
    S: Future<Output = Result<Resp, ApiError>>,
    R: FnOnce(Resp) -> RF,
    RF: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
{
    race_timeout(async move { read(send.await?).await }, deadline).await
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn discard_body(_resp: gloo_net::http::Response) -> Result<(), ApiError> {
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send `request` and read its response with `read`, both under the
    /// configured timeout. Non-2xx responses never reach `read`.
    #[cfg(feature = "hydrate")]
    async fn exchange<T, R, RF>(
        &self,
        request: Result<gloo_net::http::Request, gloo_net::Error>,
        read: R,
    ) -> Result<T, ApiError>
    where
        R: FnOnce(gloo_net::http::Response) -> RF,
        RF: Future<Output = Result<T, ApiError>>,
    {
        let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
        log::debug!("request {}", request.url());
        let send = async move {
            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            if resp.ok() {
                return Ok(resp);
            }
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::from_status(resp.status(), &body))
        };
        within_deadline(send, read, gloo_timers::future::sleep(self.config.timeout)).await
    }

    #[cfg(feature = "hydrate")]
    fn authorized_get(&self, path: &str, token: &str) -> Result<gloo_net::http::Request, gloo_net::Error> {
        gloo_net::http::Request::get(&self.config.url(path))
            .header("Authorization", &bearer(token))
            .build()
    }

    /// Create an account via `POST /register`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&self.config.url(register_endpoint())).json(credentials);
            self.exchange(request, discard_body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(unavailable())
        }
    }

    /// Log in via `POST /login` (JSON) or `POST /token` (form), per config.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails, the credentials are
    /// rejected, or the response is not a token payload.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.config.url(login_endpoint(self.config.login_mode));
            let request = match self.config.login_mode {
                LoginMode::Json => gloo_net::http::Request::post(&url).json(credentials),
                LoginMode::Form => gloo_net::http::Request::post(&url)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(login_form_body(credentials)),
            };
            self.exchange(request, read_json::<TokenResponse>).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(unavailable())
        }
    }

    /// List the user's books via `GET /books`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the token is rejected.
    pub async fn list_books(&self, token: &str) -> Result<Vec<Book>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.exchange(self.authorized_get(books_endpoint(), token), read_json::<Vec<Book>>).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(unavailable())
        }
    }

    /// Fetch one book's metadata via `GET /books/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the book is not found.
    pub async fn get_book(&self, token: &str, book_id: i64) -> Result<Book, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.exchange(self.authorized_get(&book_endpoint(book_id), token), read_json::<Book>).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, book_id);
            Err(unavailable())
        }
    }

    /// Upload a book file via multipart `POST /books/upload`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] carrying the server `detail` when the upload
    /// is rejected.
    #[cfg(feature = "hydrate")]
    pub async fn upload_book(&self, token: &str, file: &web_sys::File, title: &str) -> Result<Book, ApiError> {
        let form = web_sys::FormData::new().map_err(|_| ApiError::Validation("could not build upload form".to_owned()))?;
        form.append_with_blob("file", file)
            .and_then(|()| form.append_with_str("title", title))
            .map_err(|_| ApiError::Validation("could not attach file".to_owned()))?;
        let request = gloo_net::http::Request::post(&self.config.url(upload_endpoint()))
            .header("Authorization", &bearer(token))
            .body(form);
        self.exchange(request, read_json::<Book>).await
    }

    /// Download a book file via `GET /books/{id}/download`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body cannot be read.
    pub async fn download_book(&self, token: &str, book_id: i64) -> Result<Download, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let read = move |resp: gloo_net::http::Response| async move {
                let headers = resp.headers();
                let filename = download_filename(headers.get("content-disposition").as_deref(), book_id);
                let content_type = headers.get("content-type");
                let bytes = resp.binary().await.map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(Download { filename, content_type, bytes })
            };
            self.exchange(self.authorized_get(&download_endpoint(book_id), token), read).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, book_id);
            Err(unavailable())
        }
    }

    /// Delete a book via `DELETE /books/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server refuses.
    pub async fn delete_book(&self, token: &str, book_id: i64) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::delete(&self.config.url(&book_endpoint(book_id)))
                .header("Authorization", &bearer(token))
                .build();
            self.exchange(request, discard_body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, book_id);
            Err(unavailable())
        }
    }

    /// Fetch saved progress via `GET /books/{id}/progress`.
    ///
    /// Returns `Ok(None)` when the backend has no progress for this book yet.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures and non-404 errors.
    pub async fn get_progress(&self, token: &str, book_id: i64) -> Result<Option<Progress>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            match self.exchange(self.authorized_get(&progress_endpoint(book_id), token), read_json::<Progress>).await {
                Ok(progress) => Ok(Some(progress)),
                Err(ApiError::Server { status: 404, .. }) => Ok(None),
                Err(e) => Err(e),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, book_id);
            Err(unavailable())
        }
    }

    /// Save progress via `POST /books/{id}/progress`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server refuses.
    pub async fn save_progress(&self, token: &str, book_id: i64, position: &str) -> Result<Progress, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&self.config.url(&progress_endpoint(book_id)))
                .header("Authorization", &bearer(token))
                .json(&ProgressUpdate { position });
            self.exchange(request, read_json::<Progress>).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, book_id, position);
            Err(unavailable())
        }
    }
}

impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        ApiClient::login(self, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        ApiClient::register(self, credentials).await
    }
}
