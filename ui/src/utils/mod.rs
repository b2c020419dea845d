//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: WASM-compatible logging macros for browser console
//!   output from component code; services log through `tracing`

pub mod console_macros;
