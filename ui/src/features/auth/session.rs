//! Process-wide session state: the current identity/profile pair plus a
//! loading flag, reducer-managed with a single writer per update path.
//!
//! Two concurrent paths write here: the startup session fetch and the
//! auth-change listener. Their completion order is not guaranteed, so every
//! auth change bumps an epoch and stale completions are discarded instead of
//! applied.

use crate::services::backend::{AuthEvent, BackendSession, Identity, Profile};

#[derive(Clone, Debug)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub loading: bool,
    epoch: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
            epoch: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    /// The startup session fetch resolved
    InitResolved(Option<BackendSession>),
    /// The backend reported a sign-in or sign-out
    AuthChanged(AuthEvent),
    /// A profile fetch resolved; `epoch` is the value of [`SessionState::epoch`]
    /// when the fetch was started
    ProfileLoaded {
        epoch: u64,
        profile: Option<Profile>,
    },
}

impl SessionState {
    pub fn signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Stamp for in-flight profile fetches
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn reduce_in_place(&mut self, action: SessionAction) {
        match action {
            SessionAction::InitResolved(session) => {
                // An auth-change notification may land before the startup
                // fetch resolves; the notification wins and the late init
                // response must not resurrect a stale identity.
                if self.epoch == 0 {
                    if let Some(session) = session {
                        self.identity = Some(session.identity);
                    }
                }
                self.loading = false;
            }
            SessionAction::AuthChanged(AuthEvent::SignedIn(session)) => {
                self.epoch += 1;
                self.identity = Some(session.identity);
                // Profile for the new identity is fetched asynchronously
                self.profile = None;
            }
            SessionAction::AuthChanged(AuthEvent::SignedOut) => {
                self.epoch += 1;
                self.identity = None;
                self.profile = None;
            }
            SessionAction::ProfileLoaded { epoch, profile } => {
                if epoch == self.epoch {
                    self.profile = profile;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user_id: &str) -> BackendSession {
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

    fn profile(user_id: &str, username: &str) -> Profile {
        Profile {
            id: user_id.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn starts_loading_with_no_identity() {
        let state = SessionState::default();
        assert!(state.loading);
        assert!(!state.signed_in());
        assert!(state.profile.is_none());
    }

    #[test]
    fn init_with_existing_session_installs_the_identity() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::InitResolved(Some(session("user-1"))));
        assert!(!state.loading);
        assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("user-1"));
    }

    #[test]
    fn init_without_session_only_clears_loading() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::InitResolved(None));
        assert!(!state.loading);
        assert!(!state.signed_in());
    }

    #[test]
    fn late_init_response_does_not_resurrect_a_signed_out_identity() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedOut));
        state.reduce_in_place(SessionAction::InitResolved(Some(session("stale"))));
        assert!(!state.signed_in());
        assert!(!state.loading);
    }

    #[test]
    fn late_init_response_does_not_override_a_fresh_sign_in() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedIn(session(
            "fresh",
        ))));
        state.reduce_in_place(SessionAction::InitResolved(None));
        assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("fresh"));
        assert!(!state.loading);
    }

    #[test]
    fn sign_out_clears_identity_and_profile() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedIn(session(
            "user-1",
        ))));
        let epoch = state.epoch();
        state.reduce_in_place(SessionAction::ProfileLoaded {
            epoch,
            profile: Some(profile("user-1", "alice1")),
        });
        assert!(state.profile.is_some());

        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedOut));
        assert!(!state.signed_in());
        assert!(state.profile.is_none());
    }

    #[test]
    fn stale_profile_fetch_is_dropped_after_sign_out() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedIn(session(
            "user-1",
        ))));
        let stale_epoch = state.epoch();
        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedOut));

        state.reduce_in_place(SessionAction::ProfileLoaded {
            epoch: stale_epoch,
            profile: Some(profile("user-1", "alice1")),
        });
        assert!(state.profile.is_none());
    }

    #[test]
    fn failed_profile_fetch_leaves_profile_absent() {
        let mut state = SessionState::default();
        state.reduce_in_place(SessionAction::AuthChanged(AuthEvent::SignedIn(session(
            "user-1",
        ))));
        let epoch = state.epoch();
        state.reduce_in_place(SessionAction::ProfileLoaded {
            epoch,
            profile: None,
        });
        assert!(state.signed_in());
        assert!(state.profile.is_none());
    }
}
