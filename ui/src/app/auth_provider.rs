use std::rc::Rc;

use dioxus::prelude::*;

use crate::features::auth::{SessionAction, SessionState};
use crate::services::backend::{AuthEvent, Backend, SupabaseBackend, SupabaseConfig};
use crate::{console_error, console_info, console_warn};

/// Explicitly-owned session context shared with the components that need it.
/// The provider below is the single writer for both update paths.
#[derive(Clone)]
pub struct AuthContext {
    pub state: Signal<SessionState>,
    backend: Rc<SupabaseBackend>,
}

impl AuthContext {
    pub fn backend(&self) -> Rc<SupabaseBackend> {
        self.backend.clone()
    }

    /// Tear down the session. The state update arrives through the
    /// auth-change subscription.
    pub fn sign_out(&self) {
        let backend = self.backend.clone();
        spawn(async move {
            if let Err(e) = backend.sign_out().await {
                console_error!("[Auth] Sign-out failed: {}", e);
            }
        });
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provides [`AuthContext`] and runs the two session-state effects: the
/// startup session fetch and the auth-change listener. Their completion
/// order is unconstrained; the reducer's epoch guard keeps a late startup
/// response from resurrecting a signed-out identity.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let backend = use_hook(|| {
        let config = SupabaseConfig::from_env().unwrap_or_else(|e| {
            console_warn!("[Auth] Backend config missing ({}), using placeholder", e);
            SupabaseConfig::new("http://localhost:54321", "dev-anon-key")
        });
        Rc::new(SupabaseBackend::new(config))
    });
    let state = use_signal(SessionState::default);

    use_context_provider(|| AuthContext {
        state,
        backend: backend.clone(),
    });

    // Startup fetch: restore an existing session, then its profile
    let init_backend = backend.clone();
    use_future(move || {
        let backend = init_backend.clone();
        let mut state = state;
        async move {
            let session = match backend.get_session().await {
                Ok(session) => session,
                Err(e) => {
                    console_warn!("[Auth] Session restore failed: {}", e);
                    None
                }
            };
            let identity = session.as_ref().map(|s| s.identity.clone());
            state.with_mut(|s| s.reduce_in_place(SessionAction::InitResolved(session)));

            // Only fetch the profile if the restored identity is still current
            if let Some(identity) = identity {
                let still_current = state
                    .read()
                    .identity
                    .as_ref()
                    .is_some_and(|i| i.id == identity.id);
                if still_current {
                    let epoch = state.read().epoch();
                    let profile = backend.fetch_profile(&identity.id).await.unwrap_or(None);
                    state.with_mut(|s| {
                        s.reduce_in_place(SessionAction::ProfileLoaded { epoch, profile })
                    });
                }
            }
        }
    });

    // Auth-change listener: runs for the provider's whole lifetime
    let listen_backend = backend.clone();
    use_future(move || {
        let backend = listen_backend.clone();
        let mut state = state;
        async move {
            let mut changes = backend.subscribe_auth();
            while let Some(event) = changes.next().await {
                let identity = match &event {
                    AuthEvent::SignedIn(session) => Some(session.identity.clone()),
                    AuthEvent::SignedOut => None,
                };
                state.with_mut(|s| s.reduce_in_place(SessionAction::AuthChanged(event)));

                if let Some(identity) = identity {
                    console_info!("[Auth] Signed in as {}", identity.id);
                    let epoch = state.read().epoch();
                    // Fetch failure leaves the profile absent silently
                    let profile = backend.fetch_profile(&identity.id).await.unwrap_or(None);
                    state.with_mut(|s| {
                        s.reduce_in_place(SessionAction::ProfileLoaded { epoch, profile })
                    });
                } else {
                    console_info!("[Auth] Signed out");
                }
            }
        }
    });

    rsx! {
        {children}
    }
}
