use std::ops::RangeInclusive;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted, deliberately slow hashing for credential storage (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Cost used when none is configured (2^10 key expansion rounds).
    pub const DEFAULT_COST: u32 = 10;

    /// Work factors bcrypt accepts.
    pub const COST_RANGE: RangeInclusive<u32> = 4..=31;

    /// Create a new password hasher instance.
    ///
    /// # Arguments
    /// * `cost` - bcrypt work factor (log2 of the number of rounds)
    ///
    /// # Returns
    /// PasswordHasher configured with the given cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Work factor applied to new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password securely.
    ///
    /// A random salt is generated for every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Cost out of range or hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Comparison is delegated to bcrypt, never done on the raw strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}
