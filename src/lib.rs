//! Credscope - scoped multi-credential store
//!
//! Credscope lets a call chain carry several named access-key / secret-key
//! pairs through an immutable, layered request [`Context`] and resolve any
//! one of them, or the default, into a [`CredentialsProvider`] that a
//! signing client can query on demand. Credentials never have to be threaded
//! through function signatures.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): credential records, errors, provider port
//! - **Service Layer** (`services`): the shared scope store and its binding to contexts
//! - **Adapters** (`adapters`): the static provider handed to signing clients
//! - **Infrastructure Layer** (`infrastructure`): context propagation, configuration, logging
//!
//! # Example
//!
//! ```
//! use credscope::{Context, CredentialBinding, CredentialRecord, CredentialsProvider};
//!
//! let binding = CredentialBinding::default();
//!
//! // First attach creates the scope and a new context layer.
//! let ctx = binding.attach(
//!     &Context::background(),
//!     CredentialRecord::new("tenant-A", "AKIA...", "s3cr3t"),
//! )?;
//!
//! // Later attaches extend the same shared scope in place.
//! binding.attach(&ctx, CredentialRecord::new("tenant-B", "AKIB...", "other"))?;
//!
//! let provider = binding.resolve(&ctx, "tenant-B")?;
//! assert_eq!(provider.retrieve().secret_access_key, "other");
//!
//! // The first record attached stays the default.
//! let default = binding.resolve_default(&ctx)?;
//! assert_eq!(default.retrieve().access_key_id, "AKIA...");
//! # Ok::<(), credscope::CredentialError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::StaticCredentialsProvider;
pub use domain::errors::{CredentialError, CredentialResult};
pub use domain::models::{
    Config, CorruptedScopePolicy, CredentialRecord, CredentialsId, KeyPair, LoggingConfig,
    ScopeConfig,
};
pub use domain::ports::CredentialsProvider;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::context::{Context, ContextKey, ContextValue};
pub use services::{CredentialBinding, ScopeStore, SCOPE_KEY};
