use thiserror::Error;

/// Errors surfaced by the hosted backend collaborator. Workflows catch these at
/// their boundary and convert them to user-visible messages; none propagate
/// further and none are retried.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    AlreadyRegistered,

    #[error("Duplicate key: {message}")]
    DuplicateKey { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Backend error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl BackendError {
    /// True for the authoritative username-uniqueness rejection at insert time
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, BackendError::DuplicateKey { .. })
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
