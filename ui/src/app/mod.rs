pub mod auth_provider;

pub use auth_provider::{use_auth, AuthContext, AuthProvider};
