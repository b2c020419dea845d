//! This crate contains all shared UI components and workflows for the
//! video-sharing client.

pub mod app;
pub use app::{use_auth, AuthContext, AuthProvider};

pub mod components;
pub mod features;
pub mod services;
pub mod utils;
