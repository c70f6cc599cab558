//! Static credentials provider.
//!
//! Wraps one resolved [`CredentialRecord`] so it can be handed to a signing
//! client through the [`CredentialsProvider`] port. The record is captured
//! at resolve time; later overwrites of the same id in the scope do not
//! affect a provider that has already been handed out.

use crate::domain::models::{CredentialRecord, CredentialsId, KeyPair};
use crate::domain::ports::CredentialsProvider;

/// Name reported by [`StaticCredentialsProvider::provider_name`]
pub const STATIC_PROVIDER_NAME: &str = "StaticCredentials";

/// Provider over a single, already-validated credential record
#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    record: CredentialRecord,
}

impl StaticCredentialsProvider {
    /// Wrap a record. Only records that passed validation reach this point.
    pub(crate) const fn new(record: CredentialRecord) -> Self {
        Self { record }
    }

    /// Identifier of the wrapped record
    pub const fn id(&self) -> &CredentialsId {
        self.record.id()
    }
}

impl CredentialsProvider for StaticCredentialsProvider {
    fn retrieve(&self) -> KeyPair {
        self.record.key_pair()
    }

    fn provider_name(&self) -> &'static str {
        STATIC_PROVIDER_NAME
    }
}
