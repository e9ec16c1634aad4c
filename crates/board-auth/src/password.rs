//! Keyed password derivation
//!
//! A password is stretched with Argon2 using the account's random key as
//! salt. The raw output is stored base64 encoded next to the key, so the
//! same password and key always produce the same digest.

use argon2::password_hash::Output;
use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::debug;

use crate::config::PasswordHashConfig;
use crate::error::AuthError;

/// Length of a generated password key
pub const KEY_LENGTH: usize = 64;

/// Derives and verifies password digests under a fixed configuration
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    algorithm: Algorithm,
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher, rejecting configurations that cannot produce a digest
    pub fn new(config: &PasswordHashConfig) -> Result<Self, AuthError> {
        let algorithm = match config.algorithm.to_ascii_lowercase().as_str() {
            "argon2id" => Algorithm::Argon2id,
            "argon2i" => Algorithm::Argon2i,
            "argon2d" => Algorithm::Argon2d,
            other => {
                return Err(AuthError::Config(format!(
                    "Unsupported password algorithm: {}",
                    other
                )));
            }
        };

        if config.iterations == 0 {
            return Err(AuthError::Config(
                "Password iterations must be at least 1".to_string(),
            ));
        }

        if !(Output::MIN_LENGTH..=Output::MAX_LENGTH).contains(&config.output_len) {
            return Err(AuthError::Config(format!(
                "Password output length must be between {} and {} bytes",
                Output::MIN_LENGTH,
                Output::MAX_LENGTH
            )));
        }

        let params = Params::new(
            config.memory_kib,
            config.iterations,
            1,
            Some(config.output_len),
        )
        .map_err(|e| AuthError::Config(format!("Invalid password parameters: {}", e)))?;

        Ok(Self { algorithm, params })
    }

    /// Derive the digest of `password` under `key`
    pub fn derive(&self, password: &str, key: &str) -> Result<String, AuthError> {
        let output = self.derive_output(password, key)?;
        Ok(STANDARD.encode(output.as_bytes()))
    }

    /// Check `password` against a stored digest
    ///
    /// A digest that does not decode never matches.
    pub fn verify(&self, password: &str, key: &str, digest: &str) -> Result<bool, AuthError> {
        let derived = self.derive_output(password, key)?;
        let stored = match STANDARD.decode(digest).ok().and_then(|raw| Output::new(&raw).ok()) {
            Some(stored) => stored,
            None => return Ok(false),
        };

        // Output equality is constant time
        Ok(derived == stored)
    }

    /// Generate a fresh per-account key
    pub fn generate_key() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(KEY_LENGTH)
            .map(char::from)
            .collect()
    }

    fn derive_output(&self, password: &str, key: &str) -> Result<Output, AuthError> {
        let argon2 = Argon2::new(self.algorithm, Version::V0x13, self.params.clone());
        let mut output = vec![0u8; self.params.output_len().unwrap_or(Params::DEFAULT_OUTPUT_LEN)];

        argon2
            .hash_password_into(password.as_bytes(), key.as_bytes(), &mut output)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

        debug!("Derived password digest ({} bytes)", output.len());
        Output::new(&output).map_err(|e| AuthError::PasswordHash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PasswordHashConfig {
        PasswordHashConfig {
            algorithm: "argon2id".to_string(),
            iterations: 1,
            memory_kib: 64,
            output_len: 32,
        }
    }

    #[test]
    fn test_derive_is_deterministic() {
        let hasher = PasswordHasher::new(&test_config()).unwrap();
        let key = PasswordHasher::generate_key();

        let first = hasher.derive("secret", &key).unwrap();
        let second = hasher.derive("secret", &key).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_passwords_differ() {
        let hasher = PasswordHasher::new(&test_config()).unwrap();
        let key = PasswordHasher::generate_key();

        let a = hasher.derive("secret", &key).unwrap();
        let b = hasher.derive("newsecret", &key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify() {
        let hasher = PasswordHasher::new(&test_config()).unwrap();
        let key = PasswordHasher::generate_key();
        let digest = hasher.derive("secret", &key).unwrap();

        assert!(hasher.verify("secret", &key, &digest).unwrap());
        assert!(!hasher.verify("wrong", &key, &digest).unwrap());
    }

    #[test]
    fn test_verify_rejects_corrupt_digest() {
        let hasher = PasswordHasher::new(&test_config()).unwrap();
        let key = PasswordHasher::generate_key();
        let digest = hasher.derive("secret", &key).unwrap();

        assert!(!hasher.verify("secret", &key, "not base64!").unwrap());
        assert!(!hasher.verify("secret", &key, &digest[..digest.len() - 8]).unwrap());
        assert!(!hasher.verify("secret", &key, "").unwrap());
    }

    #[test]
    fn test_output_length() {
        let hasher = PasswordHasher::new(&test_config()).unwrap();
        let digest = hasher.derive("secret", &"k".repeat(KEY_LENGTH)).unwrap();
        assert_eq!(STANDARD.decode(digest).unwrap().len(), 32);
    }

    #[test]
    fn test_generate_key() {
        let key = PasswordHasher::generate_key();
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(key, PasswordHasher::generate_key());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = test_config();
        config.algorithm = "md5".to_string();
        assert!(matches!(
            PasswordHasher::new(&config),
            Err(AuthError::Config(_))
        ));

        let mut config = test_config();
        config.iterations = 0;
        assert!(matches!(
            PasswordHasher::new(&config),
            Err(AuthError::Config(_))
        ));

        let mut config = test_config();
        config.output_len = 2;
        assert!(matches!(
            PasswordHasher::new(&config),
            Err(AuthError::Config(_))
        ));

        let mut config = test_config();
        config.output_len = 65;
        assert!(matches!(
            PasswordHasher::new(&config),
            Err(AuthError::Config(_))
        ));
    }

    #[test]
    fn test_short_key_fails() {
        let hasher = PasswordHasher::new(&test_config()).unwrap();
        assert!(matches!(
            hasher.derive("secret", "abc"),
            Err(AuthError::PasswordHash(_))
        ));
    }
}
