//! Binding between a [`Context`] lineage and its shared [`ScopeStore`].
//!
//! A context lineage moves through two states: no scope, then scoped. The
//! first successful attach creates a [`ScopeStore`] and derives a child
//! context carrying it under [`SCOPE_KEY`]. Every later attach reachable
//! from that child mutates the same store in place and hands the caller's
//! context back unchanged, so the new record is visible from the original
//! context, its clones, and every sibling derived from the same ancestor.
//!
//! The two behaviours are also exposed separately as
//! [`CredentialBinding::create_scope`] (pure derivation) and
//! [`CredentialBinding::put_credentials`] (explicit mutation).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::StaticCredentialsProvider;
use crate::domain::errors::{CredentialError, CredentialResult};
use crate::domain::models::{Config, CorruptedScopePolicy, CredentialRecord, CredentialsId};
use crate::infrastructure::context::{Context, ContextKey};

use super::scope_store::ScopeStore;

/// Reserved context key holding the credential scope
pub const SCOPE_KEY: ContextKey = ContextKey::new("credscope.scope");

/// What a context holds under [`SCOPE_KEY`]
enum ScopeSlot {
    Empty,
    Scoped(Arc<ScopeStore>),
    Corrupted,
}

fn lookup(ctx: &Context) -> ScopeSlot {
    match ctx.value(SCOPE_KEY) {
        None => ScopeSlot::Empty,
        Some(value) => value
            .downcast::<ScopeStore>()
            .map_or(ScopeSlot::Corrupted, ScopeSlot::Scoped),
    }
}

/// Attaches credential records to contexts and resolves them into providers.
///
/// Stateless apart from its policy; cheap to copy and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialBinding {
    corrupted_scope: CorruptedScopePolicy,
}

impl CredentialBinding {
    /// Create a binding with an explicit corrupted-scope policy
    pub const fn new(corrupted_scope: CorruptedScopePolicy) -> Self {
        Self { corrupted_scope }
    }

    /// Create a binding from loaded configuration
    pub const fn from_config(config: &Config) -> Self {
        Self::new(config.scope.corrupted_scope)
    }

    /// Policy applied when the scope key holds a foreign value
    pub const fn corrupted_scope_policy(&self) -> CorruptedScopePolicy {
        self.corrupted_scope
    }

    /// Attach `record` to the lineage of `ctx`.
    ///
    /// Returns a new child context when `ctx` had no scope yet (the record
    /// becomes the default), or `ctx` itself after adding the record to the
    /// existing shared scope.
    ///
    /// # Errors
    /// - `InvalidCredentials` if either key is empty; nothing is mutated.
    /// - `CorruptedScope` if the scope key holds a foreign value and the
    ///   policy is [`CorruptedScopePolicy::Surface`]. Under the default
    ///   [`CorruptedScopePolicy::Replace`] a fresh scope layer shadows it.
    pub fn attach(&self, ctx: &Context, record: CredentialRecord) -> CredentialResult<Context> {
        record.validate()?;
        match lookup(ctx) {
            ScopeSlot::Scoped(store) => {
                debug!(id = %record.id(), "adding credentials to existing scope");
                store.put(record)?;
                Ok(ctx.clone())
            }
            ScopeSlot::Empty => Self::derive_scope(ctx, record),
            ScopeSlot::Corrupted => self.replace_corrupted(ctx, record),
        }
    }

    /// [`attach`](Self::attach) for callers holding values that may be absent.
    ///
    /// # Errors
    /// `NullContext` or `NullCredentials` for a missing argument, checked in
    /// that order, otherwise as [`attach`](Self::attach).
    pub fn try_attach(
        &self,
        ctx: Option<&Context>,
        record: Option<CredentialRecord>,
    ) -> CredentialResult<Context> {
        let ctx = ctx.ok_or(CredentialError::NullContext)?;
        let record = record.ok_or(CredentialError::NullCredentials)?;
        self.attach(ctx, record)
    }

    /// Start a new scope on a context that has none.
    ///
    /// Always derives a child layer; `ctx` is never modified.
    ///
    /// # Errors
    /// - `InvalidCredentials` if either key is empty.
    /// - `ScopeAlreadyPresent` if the lineage is already scoped.
    /// - `CorruptedScope` if the scope key holds a foreign value, whatever
    ///   the policy.
    pub fn create_scope(&self, ctx: &Context, record: CredentialRecord) -> CredentialResult<Context> {
        record.validate()?;
        match lookup(ctx) {
            ScopeSlot::Empty => Self::derive_scope(ctx, record),
            ScopeSlot::Scoped(_) => Err(CredentialError::ScopeAlreadyPresent),
            ScopeSlot::Corrupted => Err(CredentialError::CorruptedScope),
        }
    }

    /// Add or overwrite a record in the scope `ctx` already carries.
    ///
    /// # Errors
    /// - `InvalidCredentials` if either key is empty.
    /// - `NoScopePresent` if the lineage has no scope.
    /// - `CorruptedScope` if the scope key holds a foreign value.
    pub fn put_credentials(&self, ctx: &Context, record: CredentialRecord) -> CredentialResult<()> {
        record.validate()?;
        let store = Self::scope(ctx)?;
        debug!(id = %record.id(), "adding credentials to existing scope");
        store.put(record)
    }

    /// Resolve the record named `id` into a provider.
    ///
    /// # Errors
    /// `NoScopePresent`, `CorruptedScope`, or `UnknownCredentialsId`.
    pub fn resolve(&self, ctx: &Context, id: &str) -> CredentialResult<StaticCredentialsProvider> {
        let record = Self::scope(ctx)?.get(id)?;
        debug!(id = %record.id(), "resolved credentials provider");
        Ok(StaticCredentialsProvider::new(record))
    }

    /// Resolve the scope's default record into a provider.
    ///
    /// # Errors
    /// `NoScopePresent`, `CorruptedScope`, or `UnknownCredentialsId`.
    pub fn resolve_default(&self, ctx: &Context) -> CredentialResult<StaticCredentialsProvider> {
        let record = Self::scope(ctx)?.get_default()?;
        debug!(id = %record.id(), "resolved default credentials provider");
        Ok(StaticCredentialsProvider::new(record))
    }

    /// Identifiers visible from `ctx`, sorted. Never exposes key material.
    ///
    /// # Errors
    /// `NoScopePresent` or `CorruptedScope`.
    pub fn scoped_ids(&self, ctx: &Context) -> CredentialResult<Vec<CredentialsId>> {
        Ok(Self::scope(ctx)?.ids())
    }

    /// Identifier of the default record for `ctx`'s scope.
    ///
    /// # Errors
    /// `NoScopePresent` or `CorruptedScope`.
    pub fn default_id(&self, ctx: &Context) -> CredentialResult<CredentialsId> {
        Ok(Self::scope(ctx)?.default_id().clone())
    }

    /// Whether `ctx` carries a usable scope
    pub fn is_scoped(&self, ctx: &Context) -> bool {
        matches!(lookup(ctx), ScopeSlot::Scoped(_))
    }

    fn scope(ctx: &Context) -> CredentialResult<Arc<ScopeStore>> {
        match lookup(ctx) {
            ScopeSlot::Scoped(store) => Ok(store),
            ScopeSlot::Empty => Err(CredentialError::NoScopePresent),
            ScopeSlot::Corrupted => Err(CredentialError::CorruptedScope),
        }
    }

    fn derive_scope(ctx: &Context, record: CredentialRecord) -> CredentialResult<Context> {
        let store = ScopeStore::create(record)?;
        debug!(default_id = %store.default_id(), "created credential scope");
        Ok(ctx.with_value(SCOPE_KEY, Arc::new(store)))
    }

    fn replace_corrupted(&self, ctx: &Context, record: CredentialRecord) -> CredentialResult<Context> {
        match self.corrupted_scope {
            CorruptedScopePolicy::Surface => Err(CredentialError::CorruptedScope),
            CorruptedScopePolicy::Replace => {
                warn!(
                    key = SCOPE_KEY.name(),
                    "credential scope key holds a foreign value; starting a fresh scope"
                );
                Self::derive_scope(ctx, record)
            }
        }
    }
}
