//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

use credscope::{Context, CredentialBinding, CredentialRecord, CredentialsProvider};

/// Record for the first tenant in the canonical scenario
#[allow(dead_code)]
pub fn tenant_a() -> CredentialRecord {
    CredentialRecord::new("tenant-A", "AKIA...", "s3cr3t")
}

/// Record for the second tenant in the canonical scenario
#[allow(dead_code)]
pub fn tenant_b() -> CredentialRecord {
    CredentialRecord::new("tenant-B", "AKIB...", "other")
}

/// Resolve `id` from `ctx` and return its key material as a tuple
#[allow(dead_code)]
pub fn material(binding: &CredentialBinding, ctx: &Context, id: &str) -> (String, String) {
    let pair = binding
        .resolve(ctx, id)
        .unwrap_or_else(|e| panic!("resolve {id} failed: {e}"))
        .retrieve();
    (pair.access_key_id, pair.secret_access_key)
}

/// Resolve the default record from `ctx` and return its key material
#[allow(dead_code)]
pub fn default_material(binding: &CredentialBinding, ctx: &Context) -> (String, String) {
    let pair = binding
        .resolve_default(ctx)
        .unwrap_or_else(|e| panic!("resolve_default failed: {e}"))
        .retrieve();
    (pair.access_key_id, pair.secret_access_key)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
