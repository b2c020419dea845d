//! Scripted backend for workflow tests. Records every call so tests can
//! assert which backend writes were and were not attempted.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::errors::{BackendError, BackendResult};
use super::types::{AuthEvent, BackendSession, Identity, NewProfile, NewVideo, Profile};
use super::{AuthChanges, Backend};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SignUp(String),
    SignIn(String),
    SignOut,
    GetSession,
    ProfilesByUsername(String),
    FetchProfile(String),
    InsertProfile(String),
    UploadObject { namespace: String, path: String },
    InsertVideo(String),
}

#[derive(Default)]
pub struct MockBackend {
    pub calls: Mutex<Vec<Call>>,
    pub existing_usernames: Mutex<Vec<String>>,
    pub profiles: Mutex<Vec<Profile>>,
    pub session: Mutex<Option<BackendSession>>,
    pub sign_up_error: Mutex<Option<BackendError>>,
    pub sign_in_error: Mutex<Option<BackendError>>,
    pub insert_profile_error: Mutex<Option<BackendError>>,
    pub insert_video_error: Mutex<Option<BackendError>>,
    /// Uploads into this namespace fail with a storage error
    pub fail_upload_namespace: Mutex<Option<String>>,
    pub uploaded: Mutex<Vec<(String, String)>>,
    pub inserted_videos: Mutex<Vec<NewVideo>>,
    auth_events: Mutex<Option<broadcast::Sender<AuthEvent>>>,
}

pub fn test_session(user_id: &str) -> BackendSession {
    BackendSession {
        identity: Identity {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
        },
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: None,
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(user_id: &str) -> Self {
        let backend = Self::default();
        *backend.session.lock().unwrap() = Some(test_session(user_id));
        backend
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_sign_up(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::SignUp(_)))
    }

    pub fn called_insert_profile(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::InsertProfile(_)))
    }

    pub fn called_insert_video(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::InsertVideo(_)))
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn sign_up(&self, email: &str, _password: &str) -> BackendResult<Identity> {
        self.record(Call::SignUp(email.to_string()));
        if let Some(err) = self.sign_up_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(Identity {
            id: "new-user".to_string(),
            email: email.to_string(),
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> BackendResult<BackendSession> {
        self.record(Call::SignIn(email.to_string()));
        if let Some(err) = self.sign_in_error.lock().unwrap().clone() {
            return Err(err);
        }
        let session = test_session("new-user");
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.record(Call::SignOut);
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn get_session(&self) -> BackendResult<Option<BackendSession>> {
        self.record(Call::GetSession);
        Ok(self.session.lock().unwrap().clone())
    }

    fn subscribe_auth(&self) -> AuthChanges {
        let mut sender = self.auth_events.lock().unwrap();
        let tx = sender.get_or_insert_with(|| broadcast::channel(16).0);
        AuthChanges::new(tx.subscribe())
    }

    async fn profiles_by_username(&self, username: &str) -> BackendResult<Vec<Profile>> {
        self.record(Call::ProfilesByUsername(username.to_string()));
        let taken = self
            .existing_usernames
            .lock()
            .unwrap()
            .iter()
            .any(|u| u == username);
        if taken {
            Ok(vec![Profile {
                id: "someone-else".to_string(),
                username: username.to_string(),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> BackendResult<Option<Profile>> {
        self.record(Call::FetchProfile(user_id.to_string()));
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == user_id)
            .cloned())
    }

    async fn insert_profile(&self, profile: &NewProfile) -> BackendResult<()> {
        self.record(Call::InsertProfile(profile.username.clone()));
        if let Some(err) = self.insert_profile_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.profiles.lock().unwrap().push(Profile {
            id: profile.id.clone(),
            username: profile.username.clone(),
        });
        Ok(())
    }

    async fn upload_object(
        &self,
        namespace: &str,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> BackendResult<()> {
        self.record(Call::UploadObject {
            namespace: namespace.to_string(),
            path: path.to_string(),
        });
        if self.fail_upload_namespace.lock().unwrap().as_deref() == Some(namespace) {
            return Err(BackendError::Storage {
                message: format!("upload to {} failed", namespace),
            });
        }
        self.uploaded
            .lock()
            .unwrap()
            .push((namespace.to_string(), path.to_string()));
        Ok(())
    }

    fn public_url(&self, namespace: &str, path: &str) -> String {
        format!("https://backend.test/public/{}/{}", namespace, path)
    }

    async fn insert_video(&self, video: &NewVideo) -> BackendResult<()> {
        self.record(Call::InsertVideo(video.title.clone()));
        if let Some(err) = self.insert_video_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.inserted_videos.lock().unwrap().push(video.clone());
        Ok(())
    }
}
