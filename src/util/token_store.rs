//! Persistent slot for the session token and display identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only `state::auth::AuthSession` writes through this trait. The browser
//! implementation keeps values in `localStorage` so a reload can restore the
//! session; the in-memory implementation backs tests and non-browser builds.
//!
//! All operations are synchronous and treat a missing value as absent rather
//! than as an error.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub const TOKEN_KEY: &str = "token";
pub const IDENTITY_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("persistent storage unavailable")]
    Unavailable,
    #[error("failed to write {key}")]
    Write { key: String },
}

/// Key-value persistence for the current session.
pub trait TokenStore {
    /// Persisted token, or `None` when nothing (or an empty string) is stored.
    fn read(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing storage rejects the write.
    fn write(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the token and identity. Missing values are not an error.
    fn clear(&self);

    fn read_identity(&self) -> Option<String>;

    /// Persist the display identity, or remove it when `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing storage rejects the write.
    fn write_identity(&self, identity: Option<&str>) -> Result<(), StorageError>;
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Browser `localStorage` store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalStorageTokenStore {
    token_key: String,
    identity_key: String,
}

impl Default for LocalStorageTokenStore {
    fn default() -> Self {
        Self::with_keys(TOKEN_KEY, IDENTITY_KEY)
    }
}

impl LocalStorageTokenStore {
    pub fn with_keys(token_key: impl Into<String>, identity_key: impl Into<String>) -> Self {
        Self { token_key: token_key.into(), identity_key: identity_key.into() }
    }

    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
            non_empty(storage.get_item(key).ok().flatten())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|_| StorageError::Write { key: key.to_owned() })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
                return;
            };
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage remove failed for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn read(&self) -> Option<String> {
        self.get(&self.token_key)
    }

    fn write(&self, token: &str) -> Result<(), StorageError> {
        self.set(&self.token_key, token)
    }

    fn clear(&self) {
        self.remove(&self.token_key);
        self.remove(&self.identity_key);
    }

    fn read_identity(&self) -> Option<String> {
        self.get(&self.identity_key)
    }

    fn write_identity(&self, identity: Option<&str>) -> Result<(), StorageError> {
        match identity {
            Some(identity) => self.set(&self.identity_key, identity),
            None => {
                self.remove(&self.identity_key);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
struct MemorySlots {
    token: Option<String>,
    identity: Option<String>,
}

/// Process-memory store. Survives as long as the value (or a clone of the
/// owning `Arc`) does.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: Mutex<MemorySlots>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str, identity: Option<&str>) -> Self {
        let slots = MemorySlots { token: Some(token.to_owned()), identity: identity.map(str::to_owned) };
        Self { slots: Mutex::new(slots) }
    }

    fn slots(&self) -> MutexGuard<'_, MemorySlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Option<String> {
        non_empty(self.slots().token.clone())
    }

    fn write(&self, token: &str) -> Result<(), StorageError> {
        self.slots().token = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) {
        let mut slots = self.slots();
        slots.token = None;
        slots.identity = None;
    }

    fn read_identity(&self) -> Option<String> {
        non_empty(self.slots().identity.clone())
    }

    fn write_identity(&self, identity: Option<&str>) -> Result<(), StorageError> {
        self.slots().identity = identity.map(str::to_owned);
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn write(&self, token: &str) -> Result<(), StorageError> {
        (**self).write(token)
    }

    fn clear(&self) {
        (**self).clear();
    }

    fn read_identity(&self) -> Option<String> {
        (**self).read_identity()
    }

    fn write_identity(&self, identity: Option<&str>) -> Result<(), StorageError> {
        (**self).write_identity(identity)
    }
}
