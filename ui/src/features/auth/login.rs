//! Login workflow: credential submission and error classification

use thiserror::Error;
use tracing::info;

use crate::services::backend::{Backend, BackendError, BackendSession};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Login failed: {0}")]
    Backend(String),
}

pub async fn submit_login<B: Backend + ?Sized>(
    backend: &B,
    email: &str,
    password: &str,
) -> Result<BackendSession, LoginError> {
    match backend.sign_in_with_password(email, password).await {
        Ok(session) => {
            info!("Login succeeded for: {}", session.identity.id);
            Ok(session)
        }
        Err(BackendError::InvalidCredentials) => Err(LoginError::InvalidCredentials),
        Err(err) => Err(LoginError::Backend(err.to_string())),
    }
}
