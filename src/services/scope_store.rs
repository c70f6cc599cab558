//! Mutable set of named credential records with a fixed default.
//!
//! A [`ScopeStore`] is created from the first record attached to a context
//! lineage and shared by reference from then on. Every context derived from
//! the creation point sees the same store, including contexts handed to
//! concurrently running tasks, so the record map sits behind an [`RwLock`].
//! The default identifier is written once at construction and never changes.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::errors::{CredentialError, CredentialResult};
use crate::domain::models::{CredentialRecord, CredentialsId};

/// Named credential records plus the identifier of the default record
pub struct ScopeStore {
    default_id: CredentialsId,
    records: RwLock<HashMap<CredentialsId, CredentialRecord>>,
}

impl ScopeStore {
    /// Create a store whose default is `first`.
    ///
    /// # Errors
    /// [`CredentialError::InvalidCredentials`] if `first` lacks key material.
    pub fn create(first: CredentialRecord) -> CredentialResult<Self> {
        first.validate()?;
        let default_id = first.id().clone();
        let mut records = HashMap::new();
        records.insert(default_id.clone(), first);
        Ok(Self {
            default_id,
            records: RwLock::new(records),
        })
    }

    /// Insert or overwrite the record under its id. The default never moves.
    ///
    /// # Errors
    /// [`CredentialError::InvalidCredentials`] if `record` lacks key material;
    /// the store is left untouched.
    pub fn put(&self, record: CredentialRecord) -> CredentialResult<()> {
        record.validate()?;
        self.write().insert(record.id().clone(), record);
        Ok(())
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> CredentialResult<CredentialRecord> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| CredentialError::UnknownCredentialsId(CredentialsId::new(id)))
    }

    /// Look up the default record.
    ///
    /// Cannot fail while the store's invariants hold, but reports
    /// `UnknownCredentialsId` rather than panicking if they do not.
    pub fn get_default(&self) -> CredentialResult<CredentialRecord> {
        self.read()
            .get(&self.default_id)
            .cloned()
            .ok_or_else(|| CredentialError::UnknownCredentialsId(self.default_id.clone()))
    }

    /// Identifier fixed as default when the store was created
    pub const fn default_id(&self) -> &CredentialsId {
        &self.default_id
    }

    /// Whether a record with `id` is present
    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Never true for a constructed store; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All identifiers, sorted
    pub fn ids(&self) -> Vec<CredentialsId> {
        let mut ids: Vec<_> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    // A panic while holding the lock cannot leave the map half-written
    // (every mutation is a single insert), so poisoning is recovered.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CredentialsId, CredentialRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CredentialsId, CredentialRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&self) {
        self.write().clear();
    }
}

impl fmt::Debug for ScopeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeStore")
            .field("default_id", &self.default_id)
            .field("ids", &self.ids())
            .finish()
    }
}
