// Backend collaborator for the video-sharing client
//
// This module provides everything the client needs from the hosted backend:
// - Email/password authentication with auth-change notifications
// - Profile and video row storage and queries
// - Blob storage with public URL resolution
// - Session persistence in browser storage
//
// The capability surface is a trait so workflows can be exercised against a
// scripted backend in tests; the production implementation talks to a hosted
// Supabase deployment over HTTP.

pub mod errors;
pub mod session_store;
pub mod supabase;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use tokio::sync::broadcast;

pub use errors::{BackendError, BackendResult};
pub use session_store::SessionStore;
pub use supabase::{SupabaseBackend, SupabaseConfig};
pub use types::{
    current_time_millis, AuthEvent, BackendSession, Identity, NewProfile, NewVideo, Profile,
};

/// Subscription handle for backend auth-change notifications. Dropping the
/// handle unsubscribes.
pub struct AuthChanges {
    rx: broadcast::Receiver<AuthEvent>,
}

impl AuthChanges {
    pub fn new(rx: broadcast::Receiver<AuthEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next auth change. Returns `None` once the backend client
    /// is gone. Missed notifications are skipped rather than erroring.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Capability surface of the hosted backend. Signature-level only: the wire
/// protocol is owned entirely by the backend collaborator.
#[async_trait(?Send)]
pub trait Backend {
    /// Create an identity with email/password credentials
    async fn sign_up(&self, email: &str, password: &str) -> BackendResult<Identity>;

    /// Establish a session with email/password credentials
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<BackendSession>;

    /// Tear down the current session
    async fn sign_out(&self) -> BackendResult<()>;

    /// Current session, if one exists and has not expired
    async fn get_session(&self) -> BackendResult<Option<BackendSession>>;

    /// Subscribe to auth-change notifications
    fn subscribe_auth(&self) -> AuthChanges;

    /// Profiles matching the given username exactly (list may be empty)
    async fn profiles_by_username(&self, username: &str) -> BackendResult<Vec<Profile>>;

    /// Profile for the given identity id, if one exists
    async fn fetch_profile(&self, user_id: &str) -> BackendResult<Option<Profile>>;

    /// Insert a profile row; duplicate usernames are rejected with
    /// [`BackendError::DuplicateKey`]
    async fn insert_profile(&self, profile: &NewProfile) -> BackendResult<()>;

    /// Upload a blob into the given object namespace
    async fn upload_object(
        &self,
        namespace: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<()>;

    /// Public URL for a stored object. Non-failing given a successful upload.
    fn public_url(&self, namespace: &str, path: &str) -> String;

    /// Insert a video metadata row
    async fn insert_video(&self, video: &NewVideo) -> BackendResult<()>;
}
