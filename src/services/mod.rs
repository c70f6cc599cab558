//! Service layer: credential scope storage and its binding to contexts.

pub mod context_binding;
pub mod scope_store;

pub use context_binding::{CredentialBinding, SCOPE_KEY};
pub use scope_store::ScopeStore;
