//! Domain errors for credential scoping.

use thiserror::Error;

use super::models::CredentialsId;

/// Errors raised while attaching or resolving scoped credentials.
///
/// All of these are local and synchronous; none originates from I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// `attach` was called without a context
    #[error("no context provided")]
    NullContext,

    /// `attach` was called without a record
    #[error("no credentials provided")]
    NullCredentials,

    /// The record is missing its access key or secret key
    #[error("provided credentials are invalid: {id} is missing key material")]
    InvalidCredentials {
        /// Identifier of the rejected record
        id: CredentialsId,
    },

    /// The scope key holds a value that is not a scope
    #[error("invalid object stored under the credential scope key")]
    CorruptedScope,

    /// No credentials were ever attached to this context lineage
    #[error("context carries no credential scope")]
    NoScopePresent,

    /// The requested (or default) id is not in the scope
    #[error("credentials for id {0} are unavailable")]
    UnknownCredentialsId(CredentialsId),

    /// `create_scope` was called on a context that already has one
    #[error("context already carries a credential scope")]
    ScopeAlreadyPresent,
}

impl CredentialError {
    /// Whether retrying the same call could succeed.
    ///
    /// Always false: every variant reflects caller state, not a transient fault.
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result alias for credential operations
pub type CredentialResult<T> = Result<T, CredentialError>;
