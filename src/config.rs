//! Backend API configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle has no process environment, so overrides are read with
//! `option_env!` when the WASM artifact is compiled. Parsing is split from the
//! macro lookups so defaults and fallbacks stay testable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Which login endpoint the backend exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginMode {
    /// `POST /login` with a JSON `{email, password}` body.
    #[default]
    Json,
    /// `POST /token` with a form-encoded `{username, password}` body.
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid login mode: {0}")]
    LoginMode(String),
    #[error("invalid request timeout: {0}")]
    Timeout(String),
    #[error("invalid api url: {0}")]
    ApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub login_mode: LoginMode,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            login_mode: LoginMode::Json,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Build config from build-time environment overrides.
    ///
    /// Optional:
    /// - `BOIMARKER_API_URL`: backend base URL, default `http://localhost:8000`
    /// - `BOIMARKER_LOGIN_MODE`: `json` (default) or `form`
    /// - `BOIMARKER_API_TIMEOUT_SECS`: default 15
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("BOIMARKER_API_URL"),
            option_env!("BOIMARKER_LOGIN_MODE"),
            option_env!("BOIMARKER_API_TIMEOUT_SECS"),
        )
    }

    pub fn from_overrides(api_url: Option<&str>, login_mode: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let defaults = Self::default();
        let base_url = parse_base_url(api_url).unwrap_or_else(|e| {
            log::warn!("{e}; using {DEFAULT_API_URL}");
            defaults.base_url.clone()
        });
        let login_mode = parse_login_mode(login_mode).unwrap_or_else(|e| {
            log::warn!("{e}; using json login");
            LoginMode::Json
        });
        let timeout = parse_timeout(timeout_secs).unwrap_or_else(|e| {
            log::warn!("{e}; using {DEFAULT_REQUEST_TIMEOUT_SECS}s");
            defaults.timeout
        });
        Self { base_url, login_mode, timeout }
    }

    /// Join an absolute API path (`/books/1`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_API_URL.to_owned());
    };
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::ApiUrl(raw.to_owned()));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_login_mode(raw: Option<&str>) -> Result<LoginMode, ConfigError> {
    match raw.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
        None | Some("" | "json") => Ok(LoginMode::Json),
        Some("form") => Ok(LoginMode::Form),
        Some(other) => Err(ConfigError::LoginMode(other.to_owned())),
    }
}

fn parse_timeout(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    };
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::Timeout(raw.to_owned())),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}
