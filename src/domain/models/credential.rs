//! Credential records and the identifiers that name them within a scope.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::domain::errors::{CredentialError, CredentialResult};

/// Name of one credential set within a single scope.
///
/// Identifiers are only unique per [`ScopeStore`](crate::services::ScopeStore);
/// nothing prevents two unrelated scopes from using the same name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialsId(String);

impl CredentialsId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CredentialsId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CredentialsId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for CredentialsId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A named access-key / secret-key pair.
///
/// Construction performs no verification, so a record with empty key
/// material can exist; it is rejected by [`CredentialRecord::validate`]
/// before it can ever reach a scope.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    id: CredentialsId,
    access_key_id: String,
    secret_access_key: String,
}

impl CredentialRecord {
    /// Create a record from already-resolved key material
    pub fn new(
        id: impl Into<CredentialsId>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Identifier of this record
    pub const fn id(&self) -> &CredentialsId {
        &self.id
    }

    /// Access key half of the pair
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret key half of the pair
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Both key fields must be non-empty.
    pub fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// Check the record carries usable key material
    ///
    /// # Errors
    /// Returns [`CredentialError::InvalidCredentials`] if either key is empty.
    pub fn validate(&self) -> CredentialResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CredentialError::InvalidCredentials {
                id: self.id.clone(),
            })
        }
    }

    /// Copy the key material out as a [`KeyPair`]
    pub fn key_pair(&self) -> KeyPair {
        KeyPair {
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            session_token: None,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// Key material handed to a signing client on demand.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Access key identifier
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Temporary session token; static records never carry one
    pub session_token: Option<String>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
