//! Infrastructure Services
//!
//! This module provides the infrastructure services for the application:
//!
//! - **backend**: the hosted backend collaborator - authentication, row
//!   storage/query, blob storage, and browser session persistence
//!
//! The services are designed to be WASM-first, using browser APIs and async
//! traits without Send/Sync bounds for compatibility.

pub mod backend;
