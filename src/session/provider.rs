//! Session identity provider
//!
//! Reads the per-profile session identifier from local storage, creating and
//! storing a fresh UUID v4 the first time. The resolved id is cached, so the
//! store is touched at most once per provider.

use super::storage::KeyValueStore;
use crate::error::StorageError;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Storage key the session identifier lives under
pub const SESSION_ID_KEY: &str = "user_session_id";

/// Opaque per-profile identifier sent as `user_id` with every request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-or-create access to the session identifier
pub struct SessionIdentityProvider {
    store: Arc<dyn KeyValueStore>,
    resolved: OnceCell<SessionId>,
}

impl SessionIdentityProvider {
    /// Provider over the given store; nothing is read until first use
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            resolved: OnceCell::new(),
        }
    }

    /// Return the stored identifier, creating and persisting one if absent
    ///
    /// # Errors
    /// Returns `StorageError` if the store cannot be read or written. A
    /// failed call leaves the provider uninitialized, so it can be retried.
    pub fn get_or_create_session_id(&self) -> Result<SessionId, StorageError> {
        self.resolved
            .get_or_try_init(|| self.read_or_create())
            .cloned()
    }

    fn read_or_create(&self) -> Result<SessionId, StorageError> {
        if let Some(existing) = self.store.get(SESSION_ID_KEY)? {
            if !existing.is_empty() {
                tracing::debug!(session_id = %existing, "Reusing stored session id");
                return Ok(SessionId(existing));
            }
        }

        let id = SessionId::generate();
        self.store.set(SESSION_ID_KEY, id.as_str())?;
        tracing::info!(session_id = %id, "Created new session id");
        Ok(id)
    }
}
