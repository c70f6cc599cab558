pub mod config;
pub mod credential;

pub use config::{Config, CorruptedScopePolicy, LoggingConfig, ScopeConfig};
pub use credential::{CredentialRecord, CredentialsId, KeyPair};
