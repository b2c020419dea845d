use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{error, info, instrument, warn};

use super::errors::{BackendError, BackendResult};
use super::session_store::SessionStore;
use super::types::{AuthEvent, BackendSession, Identity, NewProfile, NewVideo, Profile};
use super::{AuthChanges, Backend};

const SESSION_STORAGE_KEY: &str = "vibetube_session";

/// Connection settings for the hosted Supabase deployment
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Read the project URL and anon key baked in at compile time
    pub fn from_env() -> Result<Self> {
        let base_url = option_env!("SUPABASE_URL")
            .ok_or_else(|| anyhow!("SUPABASE_URL is not set"))?
            .trim_end_matches('/')
            .to_string();
        let anon_key = option_env!("SUPABASE_ANON_KEY")
            .ok_or_else(|| anyhow!("SUPABASE_ANON_KEY is not set"))?
            .to_string();
        Ok(Self { base_url, anon_key })
    }

    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }
}

/// Client for the hosted backend: GoTrue auth, PostgREST rows, object storage
pub struct SupabaseBackend {
    http_client: Client,
    config: SupabaseConfig,
    session_store: SessionStore,
    auth_events: broadcast::Sender<AuthEvent>,
}

impl SupabaseBackend {
    pub fn new(config: SupabaseConfig) -> Self {
        let (auth_events, _) = broadcast::channel(16);
        Self {
            http_client: Client::new(),
            config,
            session_store: SessionStore::new_persistent(SESSION_STORAGE_KEY),
            auth_events,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    /// Bearer token for row and object operations: the session token when
    /// signed in, the anon key otherwise
    fn bearer_token(&self) -> String {
        match self.session_store.get_session() {
            Ok(Some(session)) => session.access_token,
            _ => self.config.anon_key.clone(),
        }
    }

    fn emit(&self, event: AuthEvent) {
        // No subscribers is fine; the send error only means nobody listens yet
        let _ = self.auth_events.send(event);
    }

    fn parse_session(&self, body: &serde_json::Value) -> BackendResult<BackendSession> {
        let user = &body["user"];
        let identity = Identity {
            id: user["id"].as_str().unwrap_or_default().to_string(),
            email: user["email"].as_str().unwrap_or_default().to_string(),
        };
        if identity.id.is_empty() {
            return Err(BackendError::Serialization {
                message: "Sign-in response is missing the user id".to_string(),
            });
        }
        Ok(BackendSession {
            identity,
            access_token: body["access_token"].as_str().unwrap_or_default().to_string(),
            refresh_token: body["refresh_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            expires_at: body["expires_at"].as_u64(),
        })
    }
}

/// Extract the human-readable message from a GoTrue or PostgREST error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| v[key].as_str().map(|s| s.to_string()))
        })
        .unwrap_or_else(|| body.to_string())
}

/// Classify a failed PostgREST insert: Postgres unique violations come back
/// with SQLSTATE 23505
fn classify_insert_error(status: u16, body: &str) -> BackendError {
    let message = error_message(body);
    let code = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["code"].as_str().map(|s| s.to_string()));
    if code.as_deref() == Some("23505") || message.contains("duplicate key") {
        BackendError::DuplicateKey { message }
    } else {
        BackendError::Service { status, message }
    }
}

#[async_trait(?Send)]
impl Backend for SupabaseBackend {
    #[instrument(skip(self, password), err)]
    async fn sign_up(&self, email: &str, password: &str) -> BackendResult<Identity> {
        info!("Creating account for email: {}", email);

        let response = self
            .http_client
            .post(self.auth_url("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to call signup: {}", e),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = error_message(&body);
            error!("Sign-up failed ({}): {}", status, message);
            if message.to_lowercase().contains("already registered") || status.as_u16() == 422 {
                return Err(BackendError::AlreadyRegistered);
            }
            return Err(BackendError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        // GoTrue nests the user when auto-confirm issues a session immediately
        let user = if value["user"].is_object() {
            &value["user"]
        } else {
            &value
        };
        let identity = Identity {
            id: user["id"].as_str().unwrap_or_default().to_string(),
            email: user["email"].as_str().unwrap_or(email).to_string(),
        };
        if identity.id.is_empty() {
            return Err(BackendError::Serialization {
                message: "Sign-up response is missing the user id".to_string(),
            });
        }
        info!("Account created: {}", identity.id);
        Ok(identity)
    }

    #[instrument(skip(self, password), err)]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<BackendSession> {
        info!("Signing in: {}", email);

        let response = self
            .http_client
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to call token endpoint: {}", e),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = error_message(&body);
            if message.contains("Invalid login credentials") {
                return Err(BackendError::InvalidCredentials);
            }
            error!("Sign-in failed ({}): {}", status, message);
            return Err(BackendError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        let session = self.parse_session(&value)?;
        self.session_store.store_session(&session)?;
        self.emit(AuthEvent::SignedIn(session.clone()));
        info!("Signed in as: {}", session.identity.id);
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        // Best effort server-side revocation; the local teardown must happen
        // even when the network call fails
        let token = self.bearer_token();
        let result = self
            .http_client
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
        if let Err(e) = result {
            warn!("Logout call failed, clearing local session anyway: {}", e);
        }

        self.session_store.clear_session()?;
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn get_session(&self) -> BackendResult<Option<BackendSession>> {
        self.session_store.get_session()
    }

    fn subscribe_auth(&self) -> AuthChanges {
        AuthChanges::new(self.auth_events.subscribe())
    }

    #[instrument(skip(self), err)]
    async fn profiles_by_username(&self, username: &str) -> BackendResult<Vec<Profile>> {
        let filter = format!("eq.{}", username);
        let response = self
            .http_client
            .get(self.rest_url("profiles"))
            .query(&[("select", "id,username"), ("username", filter.as_str())])
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer_token()))
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to query profiles: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Service {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json::<Vec<Profile>>()
            .await
            .map_err(|e| BackendError::Serialization {
                message: format!("Failed to parse profiles: {}", e),
            })
    }

    async fn fetch_profile(&self, user_id: &str) -> BackendResult<Option<Profile>> {
        let filter = format!("eq.{}", user_id);
        let response = self
            .http_client
            .get(self.rest_url("profiles"))
            .query(&[("select", "id,username"), ("id", filter.as_str())])
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer_token()))
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to fetch profile: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Service {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let mut profiles: Vec<Profile> =
            response
                .json()
                .await
                .map_err(|e| BackendError::Serialization {
                    message: format!("Failed to parse profile: {}", e),
                })?;
        Ok(if profiles.is_empty() {
            None
        } else {
            Some(profiles.remove(0))
        })
    }

    #[instrument(skip(self), err)]
    async fn insert_profile(&self, profile: &NewProfile) -> BackendResult<()> {
        info!("Inserting profile '{}' for {}", profile.username, profile.id);

        let response = self
            .http_client
            .post(self.rest_url("profiles"))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer_token()))
            .json(profile)
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to insert profile: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_insert_error(status.as_u16(), &body);
            error!("Profile insert failed: {}", err);
            return Err(err);
        }
        Ok(())
    }

    #[instrument(skip(self, bytes), err)]
    async fn upload_object(
        &self,
        namespace: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<()> {
        info!(
            "Uploading {} bytes to {}/{}",
            bytes.len(),
            namespace,
            path
        );

        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, namespace, path
        );
        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer_token()))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to upload object: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            error!("Object upload to {}/{} failed: {}", namespace, path, message);
            return Err(BackendError::Storage { message });
        }
        Ok(())
    }

    fn public_url(&self, namespace: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, namespace, path
        )
    }

    #[instrument(skip(self), err)]
    async fn insert_video(&self, video: &NewVideo) -> BackendResult<()> {
        info!("Inserting video row '{}' for {}", video.title, video.author_id);

        let response = self
            .http_client
            .post(self.rest_url("videos"))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer_token()))
            .json(video)
            .send()
            .await
            .map_err(|e| BackendError::Network {
                message: format!("Failed to insert video: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_insert_error(status.as_u16(), &body);
            error!("Video insert failed: {}", err);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_is_classified_from_sqlstate() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"profiles_username_key\""}"#;
        assert!(classify_insert_error(409, body).is_duplicate_key());
    }

    #[test]
    fn duplicate_key_is_classified_from_message() {
        let body = r#"{"message":"duplicate key value violates unique constraint"}"#;
        assert!(classify_insert_error(409, body).is_duplicate_key());
    }

    #[test]
    fn other_insert_failures_stay_generic() {
        let body = r#"{"code":"42501","message":"permission denied for table profiles"}"#;
        let err = classify_insert_error(403, body);
        assert!(!err.is_duplicate_key());
        assert!(matches!(err, BackendError::Service { status: 403, .. }));
    }

    #[test]
    fn error_message_prefers_known_fields() {
        assert_eq!(
            error_message(r#"{"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(
            error_message(r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[test]
    fn public_urls_are_formatted_locally() {
        let backend = SupabaseBackend::new(SupabaseConfig::new(
            "https://proj.supabase.co/",
            "anon",
        ));
        assert_eq!(
            backend.public_url("videos", "user-1/17000.mp4"),
            "https://proj.supabase.co/storage/v1/object/public/videos/user-1/17000.mp4"
        );
    }
}
