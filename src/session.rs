//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "is someone signed in, and who". The route
//! guard and the API client both receive a `SessionStore` handle; nothing
//! else reads or writes the `token`/`user` slots directly.
//!
//! DESIGN
//! ======
//! The session lives in two independent storage slots: `token` holds the raw
//! bearer token, `user` holds the JSON-serialized profile. `clear_auth`
//! removes them one after the other (token first), so an interrupted clear
//! can leave a stale `user` behind but never a token without the caller
//! having asked for one. Authentication checks only look at `token`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage slot holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage slot holding the JSON-serialized [`User`].
pub const USER_KEY: &str = "user";

// =============================================================================
// TYPES
// =============================================================================

/// Signed-in user profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Point-in-time view of both session slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("user encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// STORE
// =============================================================================

/// Cheaply cloneable handle over the session slots of a storage backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self { storage: Arc::new(storage) }
    }

    #[must_use]
    pub fn get_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    /// Persist `token` for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.storage.set_item(TOKEN_KEY, token)?;
        Ok(())
    }

    /// Read the stored user. A missing or unparseable slot reads as `None`.
    #[must_use]
    pub fn get_user(&self) -> Option<User> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "stored user is unreadable; treating as absent");
                None
            }
        }
    }

    /// Persist the serialized `user` record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the storage write fails.
    pub fn set_user(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &raw)?;
        Ok(())
    }

    /// Write token and user for a freshly authenticated session.
    ///
    /// # Errors
    ///
    /// Returns an error if either slot cannot be written.
    pub fn establish(&self, token: &str, user: &User) -> Result<(), SessionError> {
        self.set_token(token)?;
        self.set_user(user)
    }

    /// Remove token, then user.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure. The user slot is still attempted
    /// when removing the token fails.
    pub fn clear_auth(&self) -> Result<(), SessionError> {
        let token = self.storage.remove_item(TOKEN_KEY);
        let user = self.storage.remove_item(USER_KEY);
        token?;
        user?;
        Ok(())
    }

    /// True iff a non-empty token is stored. No expiry or signature check.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        Session { token: self.get_token(), user: self.get_user() }
    }
}
