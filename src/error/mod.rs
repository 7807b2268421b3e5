//! Error types for command registration and dispatch.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
