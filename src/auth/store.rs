//! Fixed in-memory credential table.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{GateError, GateResult};

/// Credential entry from config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfiguredUser {
    /// Unique login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

impl ConfiguredUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Immutable username to password mapping.
///
/// Populated once at startup and never mutated, so it can be shared
/// across request handlers without locking.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Build the store from configured entries.
    ///
    /// Rejects empty usernames and usernames that appear more than once.
    pub fn from_config(users: Vec<ConfiguredUser>) -> GateResult<Self> {
        let mut table = HashMap::with_capacity(users.len());

        for user in users {
            if user.username.is_empty() {
                return Err(GateError::Config(
                    "credential entry has an empty username".to_string(),
                ));
            }
            if table.contains_key(&user.username) {
                return Err(GateError::Config(format!(
                    "duplicate credential entry for user '{}'",
                    user.username
                )));
            }
            table.insert(user.username, user.password);
        }

        Ok(Self { users: table })
    }

    /// Look up the stored password for a username.
    pub fn get(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
