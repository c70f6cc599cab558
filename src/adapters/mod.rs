//! Adapters implementing domain ports.

pub mod static_provider;

pub use static_provider::{StaticCredentialsProvider, STATIC_PROVIDER_NAME};
