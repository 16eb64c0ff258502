//! In-memory credential store.
//!
//! Temporary backing for user accounts until a real database lands; the
//! [`CredentialStore`] trait is the seam a persistent implementation will
//! plug into. Secrets are stored as Argon2id PHC strings, never plaintext.
use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use parking_lot::RwLock;

use crate::error::AppError;

pub trait CredentialStore: Send + Sync {
    /// Creates an account. Fails with [`AppError::AlreadyExists`] if the
    /// identity is taken; the check and insert happen atomically.
    fn register(&self, identity: &str, secret: &str) -> Result<(), AppError>;

    /// True iff the identity exists and the secret matches its stored hash.
    fn verify(&self, identity: &str, secret: &str) -> bool;
}

#[derive(Default)]
pub struct MemoryAccounts {
    accounts: RwLock<HashMap<String, String>>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryAccounts {
    fn register(&self, identity: &str, secret: &str) -> Result<(), AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|_| AppError::Hashing)?
            .to_string();

        let mut accounts = self.accounts.write();
        if accounts.contains_key(identity) {
            return Err(AppError::AlreadyExists);
        }
        accounts.insert(identity.to_string(), hash);

        Ok(())
    }

    fn verify(&self, identity: &str, secret: &str) -> bool {
        let accounts = self.accounts.read();

        let Some(stored) = accounts.get(identity) else {
            return false;
        };

        PasswordHash::new(stored)
            .map(|hash| {
                Argon2::default()
                    .verify_password(secret.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_verify() {
        let store = MemoryAccounts::new();

        store.register("a@example.com", "hunter2").unwrap();

        assert!(store.verify("a@example.com", "hunter2"));
        assert!(!store.verify("a@example.com", "hunter3"));
        assert!(!store.verify("b@example.com", "hunter2"));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let store = MemoryAccounts::new();

        store.register("a@example.com", "first").unwrap();
        let err = store.register("a@example.com", "second").unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists));
        // The original secret still works.
        assert!(store.verify("a@example.com", "first"));
        assert!(!store.verify("a@example.com", "second"));
    }

    #[test]
    fn stored_credential_is_not_plaintext() {
        let store = MemoryAccounts::new();

        store.register("a@example.com", "hunter2").unwrap();

        let accounts = store.accounts.read();
        let stored = accounts.get("a@example.com").unwrap();
        assert_ne!(stored, "hunter2");
        assert!(stored.starts_with("$argon2"));
    }

    #[test]
    fn same_secret_gets_distinct_salts() {
        let store = MemoryAccounts::new();

        store.register("a@example.com", "hunter2").unwrap();
        store.register("b@example.com", "hunter2").unwrap();

        let accounts = store.accounts.read();
        assert_ne!(
            accounts.get("a@example.com"),
            accounts.get("b@example.com")
        );
    }
}
