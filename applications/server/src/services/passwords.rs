/// Password service - storage policy and credential checks
use crate::{config::PasswordStorage, error::Result};
use sociaty_core::User;

#[derive(Debug, Clone)]
pub struct PasswordService {
    storage: PasswordStorage,
    bcrypt_cost: u32,
}

impl PasswordService {
    pub fn new(storage: PasswordStorage, bcrypt_cost: u32) -> Self {
        Self {
            storage,
            bcrypt_cost,
        }
    }

    /// Turn a submitted password into the form written to the store
    pub fn hash_password(&self, password: &str) -> Result<String> {
        match self.storage {
            PasswordStorage::Plaintext => Ok(password.to_string()),
            PasswordStorage::Bcrypt => Ok(bcrypt::hash(password, self.bcrypt_cost)?),
        }
    }

    /// Verify a password against its stored form
    ///
    /// Bcrypt hashes are verified whatever the current policy is, so a store
    /// holding both kinds of record keeps working after the policy changes.
    pub fn verify_password(&self, password: &str, stored: &str) -> Result<bool> {
        if is_bcrypt_hash(stored) {
            return Ok(bcrypt::verify(password, stored)?);
        }
        Ok(password == stored)
    }

    /// Check a login attempt against a looked-up user
    pub fn check_credentials(&self, user: Option<&User>, password: &str) -> Result<bool> {
        match user {
            Some(user) => self.verify_password(password, &user.password),
            None => Ok(false),
        }
    }
}

fn is_bcrypt_hash(stored: &str) -> bool {
    stored.len() == 60
        && ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| stored.starts_with(prefix))
}
