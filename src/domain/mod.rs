//! Domain layer for credscope
//!
//! This module contains the credential model, the error taxonomy and the
//! port consumed by signing clients.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{CredentialError, CredentialResult};
