// Core types exchanged with the hosted backend - no dioxus imports needed here
use serde::{Deserialize, Serialize};

/// Get current time in milliseconds since UNIX epoch (WASM compatible)
#[cfg(target_arch = "wasm32")]
pub fn current_time_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Get current time in milliseconds since UNIX epoch (native, used by tests)
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Backend-authenticated user record. Created by the backend on sign-up,
/// read-only to this client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

/// Application-level user record extending an [`Identity`] with a unique
/// display username. At most one profile exists per identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

/// Profile row payload for the registration insert
#[derive(Serialize, Debug, Clone)]
pub struct NewProfile {
    pub id: String,
    pub username: String,
}

/// Video metadata row, inserted only after both blobs are stored and their
/// public URLs resolved. There is no update or delete lifecycle.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub author_id: String,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: String,
}

/// Session credentials issued by the backend on sign-in
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BackendSession {
    pub identity: Identity,
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds since UNIX epoch, absent when the backend did not report one
    pub expires_at: Option<u64>,
}

impl BackendSession {
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            current_time_millis() / 1000 >= expires_at
        } else {
            false
        }
    }
}

/// Auth-change notification emitted by the backend client
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(BackendSession),
    SignedOut,
}
