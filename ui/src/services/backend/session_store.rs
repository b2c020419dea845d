use gloo_storage::{LocalStorage, SessionStorage, Storage};
use tracing::{info, warn};

use super::errors::BackendError;
use super::types::BackendSession;

/// Browser-side persistence for the backend-issued session credentials
pub struct SessionStore {
    storage_key: String,
    use_session_storage: bool,
}

impl SessionStore {
    /// Create a session store backed by sessionStorage (cleared with the tab)
    pub fn new(storage_key: &str) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            use_session_storage: true,
        }
    }

    /// Create a session store backed by localStorage (persists across tabs)
    pub fn new_persistent(storage_key: &str) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            use_session_storage: false,
        }
    }

    /// Store session credentials
    pub fn store_session(&self, session: &BackendSession) -> Result<(), BackendError> {
        let session_json =
            serde_json::to_string(session).map_err(|e| BackendError::Serialization {
                message: format!("Failed to serialize session: {}", e),
            })?;

        if self.use_session_storage {
            SessionStorage::set(&self.storage_key, session_json).map_err(|e| {
                BackendError::Storage {
                    message: format!("Failed to store session in sessionStorage: {:?}", e),
                }
            })?;
        } else {
            LocalStorage::set(&self.storage_key, session_json).map_err(|e| {
                BackendError::Storage {
                    message: format!("Failed to store session in localStorage: {:?}", e),
                }
            })?;
        }

        info!("Session stored for user: {}", session.identity.id);
        Ok(())
    }

    /// Get stored session credentials, dropping expired ones
    pub fn get_session(&self) -> Result<Option<BackendSession>, BackendError> {
        let session_json = if self.use_session_storage {
            match SessionStorage::get::<String>(&self.storage_key) {
                Ok(json) => json,
                Err(_) => return Ok(None),
            }
        } else {
            match LocalStorage::get::<String>(&self.storage_key) {
                Ok(json) => json,
                Err(_) => return Ok(None),
            }
        };

        let session: BackendSession =
            serde_json::from_str(&session_json).map_err(|e| BackendError::Serialization {
                message: format!("Failed to deserialize session: {}", e),
            })?;

        if session.is_expired() {
            warn!("Stored session is expired for user: {}", session.identity.id);
            self.clear_session()?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Clear the stored session
    pub fn clear_session(&self) -> Result<(), BackendError> {
        if self.use_session_storage {
            SessionStorage::delete(&self.storage_key);
        } else {
            LocalStorage::delete(&self.storage_key);
        }
        info!("Session cleared");
        Ok(())
    }
}
