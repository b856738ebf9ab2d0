//! Salted password hashing for admin accounts.
//!
//! Hashes are bcrypt strings (`$2b$...`), so they fit the 128-character
//! `password` column and stay verifiable by any bcrypt implementation.

use thiserror::Error;

/// Work factor used when the configuration does not override it.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, PasswordError> {
    if plaintext.is_empty() {
        return Err(PasswordError::Empty);
    }
    Ok(bcrypt::hash(plaintext, cost)?)
}

/// Checks a plaintext password against a stored hash.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(plaintext, hash)?)
}
