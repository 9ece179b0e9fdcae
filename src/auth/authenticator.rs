//! Credential predicate shared by the HTTP adapter and the terminal form.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::auth::CredentialStore;

/// Trait for credential checks.
///
/// Total over every pair of strings: a mismatch is `false`, never an error.
pub trait Authenticator: Send + Sync {
    /// Return `true` iff `username` exists and `password` is exactly its stored value.
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Authenticator backed by an injected [`CredentialStore`].
#[derive(Debug, Clone)]
pub struct StoreAuthenticator {
    store: Arc<CredentialStore>,
}

impl StoreAuthenticator {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    /// Number of users the underlying store holds.
    pub fn user_count(&self) -> usize {
        self.store.len()
    }
}

impl Authenticator for StoreAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        let stored = self.store.get(username);

        // Unknown users still pay for a comparison.
        let matched = digests_match(stored.unwrap_or_default(), password);
        let ok = stored.is_some() && matched;

        if ok {
            tracing::debug!(username = %username, "Credentials accepted");
        } else {
            tracing::warn!(
                username = %username,
                known_user = stored.is_some(),
                "Credentials rejected"
            );
        }

        ok
    }
}

/// Compare two strings through their SHA-256 digests.
///
/// Digests have a fixed length and are compared without early exit, so the
/// time taken does not reveal the position of the first differing byte.
fn digests_match(expected: &str, candidate: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let candidate = Sha256::digest(candidate.as_bytes());

    expected
        .iter()
        .zip(candidate.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
