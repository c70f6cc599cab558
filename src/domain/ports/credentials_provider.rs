use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::models::KeyPair;

/// Port trait for the capability handed to a signing or authentication client.
///
/// The client calls [`retrieve`](CredentialsProvider::retrieve) whenever it
/// needs key material and performs all network and signing work itself.
/// Implementations must answer synchronously and must not block on I/O.
///
/// # Examples
///
/// ```
/// use credscope::domain::models::KeyPair;
/// use credscope::domain::ports::CredentialsProvider;
///
/// #[derive(Debug)]
/// struct Fixed;
///
/// impl CredentialsProvider for Fixed {
///     fn retrieve(&self) -> KeyPair {
///         KeyPair {
///             access_key_id: "AKIA".into(),
///             secret_access_key: "secret".into(),
///             session_token: None,
///         }
///     }
///
///     fn provider_name(&self) -> &'static str {
///         "Fixed"
///     }
/// }
///
/// assert_eq!(Fixed.retrieve().access_key_id, "AKIA");
/// ```
pub trait CredentialsProvider: Send + Sync + Debug {
    /// Return the current access-key / secret-key pair
    fn retrieve(&self) -> KeyPair;

    /// Short label identifying where the key material came from
    fn provider_name(&self) -> &'static str;
}

impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Arc<P> {
    fn retrieve(&self) -> KeyPair {
        (**self).retrieve()
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Box<P> {
    fn retrieve(&self) -> KeyPair {
        (**self).retrieve()
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
