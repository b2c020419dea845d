//! Registration workflow: availability pre-check, account creation, profile
//! insert, auto sign-in. Strictly sequential, no retries, no rollback.

use thiserror::Error;
use tracing::{info, warn};

use crate::services::backend::{Backend, BackendError, BackendSession, NewProfile};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegisterError {
    #[error("This username is already taken")]
    UsernameTaken,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Failed to create profile")]
    ProfileCreation,

    #[error("Registration failed: {0}")]
    Backend(String),
}

/// Optimistic availability check used when the username field loses focus.
/// The authoritative check is the insert-time duplicate-key rejection.
pub async fn check_username_available<B: Backend + ?Sized>(
    backend: &B,
    username: &str,
) -> Result<bool, BackendError> {
    let matches = backend.profiles_by_username(username).await?;
    Ok(matches.is_empty())
}

/// Create an account end to end and return the established session.
///
/// A sign-up whose profile insert then fails leaves an orphaned identity
/// behind; there is no compensating rollback.
pub async fn submit_registration<B: Backend + ?Sized>(
    backend: &B,
    email: &str,
    username: &str,
    password: &str,
) -> Result<BackendSession, RegisterError> {
    // Step 1: optimistic pre-check, no write attempted when the name is taken
    let existing = backend
        .profiles_by_username(username)
        .await
        .map_err(|e| RegisterError::Backend(e.to_string()))?;
    if !existing.is_empty() {
        info!("Username '{}' is already taken, blocking sign-up", username);
        return Err(RegisterError::UsernameTaken);
    }

    // Step 2: create the identity
    let identity = backend
        .sign_up(email, password)
        .await
        .map_err(|_| RegisterError::EmailTaken)?;

    // Step 3: create the profile row. A duplicate-key rejection here is the
    // race-losing path even though the pre-check passed.
    let profile = NewProfile {
        id: identity.id.clone(),
        username: username.to_string(),
    };
    if let Err(err) = backend.insert_profile(&profile).await {
        if err.is_duplicate_key() {
            warn!("Username '{}' was taken between check and insert", username);
            return Err(RegisterError::UsernameTaken);
        }
        warn!("Profile insert failed, identity {} is orphaned", identity.id);
        return Err(RegisterError::ProfileCreation);
    }

    // Step 4: establish the session with the same credentials
    backend
        .sign_in_with_password(email, password)
        .await
        .map_err(|e| RegisterError::Backend(e.to_string()))
}
