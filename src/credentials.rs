use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::ConfigError;

/// Fixed username → secret mapping, built once at startup.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Parses `username:secret,username:secret,...`.
    ///
    /// Pairs are trimmed and split on the first `:`, so secrets may contain
    /// colons. A repeated username keeps its last secret.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Err(ConfigError::EmptyCredentials);
        }

        let mut users = HashMap::new();
        for (position, pair) in source.split(',').enumerate() {
            let (username, secret) = pair
                .trim()
                .split_once(':')
                .ok_or(ConfigError::InvalidCredentialEntry { position })?;

            if username.is_empty() || secret.is_empty() {
                return Err(ConfigError::InvalidCredentialEntry { position });
            }

            if users
                .insert(username.to_string(), secret.to_string())
                .is_some()
            {
                tracing::warn!("Duplicate USERS entry for '{}', last one wins", username);
            }
        }

        Ok(Self { users })
    }

    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    /// Checks a login attempt. Secrets are compared through their SHA-256
    /// digests so the comparison time does not depend on where they differ.
    pub fn verify(&self, username: &str, secret: &str) -> bool {
        match self.lookup(username) {
            Some(expected) => digests_match(expected, secret),
            None => {
                std::hint::black_box(digests_match("", secret));
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromStr for CredentialStore {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut usernames: Vec<&str> = self.users.keys().map(String::as_str).collect();
        usernames.sort_unstable();
        f.debug_struct("CredentialStore")
            .field("usernames", &usernames)
            .finish()
    }
}

fn digests_match(expected: &str, supplied: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let supplied = Sha256::digest(supplied.as_bytes());
    expected
        .iter()
        .zip(supplied.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_trims_whitespace() {
        let store = CredentialStore::parse(" alice:wonderland , bob:builder").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("alice"), Some("wonderland"));
        assert_eq!(store.lookup("bob"), Some("builder"));
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let store = CredentialStore::parse("alice:wonderland").unwrap();
        assert_eq!(store.lookup("Alice"), None);
    }

    #[test]
    fn secret_may_contain_colons() {
        let store = CredentialStore::parse("carol:a:b:c").unwrap();
        assert_eq!(store.lookup("carol"), Some("a:b:c"));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert_eq!(
            CredentialStore::parse("").unwrap_err(),
            ConfigError::EmptyCredentials
        );
        assert_eq!(
            CredentialStore::parse(" \t\n").unwrap_err(),
            ConfigError::EmptyCredentials
        );
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert_eq!(
            CredentialStore::parse("alice").unwrap_err(),
            ConfigError::InvalidCredentialEntry { position: 0 }
        );
        assert_eq!(
            CredentialStore::parse("alice:wonderland,:secret").unwrap_err(),
            ConfigError::InvalidCredentialEntry { position: 1 }
        );
        assert_eq!(
            CredentialStore::parse("alice:").unwrap_err(),
            ConfigError::InvalidCredentialEntry { position: 0 }
        );
        assert_eq!(
            CredentialStore::parse("alice:wonderland,").unwrap_err(),
            ConfigError::InvalidCredentialEntry { position: 1 }
        );
    }

    #[test]
    fn duplicate_username_keeps_last_secret() {
        let store = CredentialStore::parse("alice:first,alice:second").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("alice"), Some("second"));
    }

    #[test]
    fn verify_checks_username_and_secret() {
        let store: CredentialStore = "alice:wonderland".parse().unwrap();
        assert!(store.verify("alice", "wonderland"));
        assert!(!store.verify("alice", "wonderlan"));
        assert!(!store.verify("alice", ""));
        assert!(!store.verify("bob", "wonderland"));
    }

    #[test]
    fn debug_output_omits_secrets() {
        let store = CredentialStore::parse("alice:wonderland").unwrap();
        let rendered = format!("{:?}", store);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("wonderland"));
    }
}
