use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::core::error::{AppError, Result};

/// Hashes a plaintext password with Argon2id and a fresh random salt
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AppError::Internal("Password hashing failed".to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Verifies a plaintext password against a stored hash. A mismatch is
/// `Ok(false)`; a stored hash that cannot be parsed is an internal error.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        tracing::error!("Stored password hash is malformed: {}", e);
        AppError::Internal("Malformed password hash".to_string())
    })?;

    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
