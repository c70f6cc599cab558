//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces adapters must implement:
//! - CredentialsProvider: on-demand key material for an external signing client

pub mod credentials_provider;

pub use credentials_provider::CredentialsProvider;
