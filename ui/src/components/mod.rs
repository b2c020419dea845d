//! User Interface Components
//!
//! This module contains reusable Dioxus components for the application UI:
//!
//! - **forms**: login, registration, and upload forms
//! - **inputs**: validated input fields and validation feedback
//!
//! All components are designed to work within the Dioxus framework and
//! support WASM deployment targets.

pub mod forms;
pub mod inputs;
