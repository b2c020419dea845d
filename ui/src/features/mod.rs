//! Application Workflows
//!
//! Each workflow is a named, sequential, non-retrying orchestration of
//! validation and backend calls triggered by a single user action:
//!
//! - **auth**: validation rules, session state, registration and login
//! - **upload**: sequential blob uploads plus the video metadata insert

pub mod auth;
pub mod upload;
