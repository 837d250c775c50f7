//! Password hashing and verification utilities
//!
//! Uses Argon2id with configurable cost. Every call builds its own hasher,
//! so nothing here holds shared mutable state.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::PasswordHashConfig;
use crate::error::AppError;

fn hasher(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

/// Hash a password using Argon2id with the given parameters
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str, params: &Params) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher(params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a PHC hash string.
///
/// The cost parameters are read from the hash itself, so hashes produced
/// under older settings keep verifying.
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password service for dependency injection
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
    /// Verified against when no member matches, so both login failures cost the same
    dummy_hash: String,
}

impl PasswordService {
    /// Create a new password service with the given cost
    ///
    /// # Errors
    /// Returns `AppError::Config` if the parameters are rejected by argon2
    pub fn new(config: PasswordHashConfig) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::Config(format!("invalid password hash parameters: {e}")))?;
        let dummy_hash = hash_password("roster-dummy-password", &params)?;

        Ok(Self { params, dummy_hash })
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password, &self.params)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }

    /// Burn the same amount of work as a real verification, always failing
    pub fn verify_dummy(&self, password: &str) {
        let _ = verify_password(password, &self.dummy_hash);
    }
}

impl std::fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordService")
            .field("memory_kib", &self.params.m_cost())
            .field("iterations", &self.params.t_cost())
            .field("parallelism", &self.params.p_cost())
            .finish_non_exhaustive()
    }
}
