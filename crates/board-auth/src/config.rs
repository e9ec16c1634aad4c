//! Authentication configuration
//!
//! Every field here is required. There are no fallbacks for the signing
//! secret, token lifetime or derivation parameters.

use serde::{Deserialize, Serialize};

/// Token signing and password derivation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub token_ttl_secs: i64,
    /// Password derivation parameters
    pub password: PasswordHashConfig,
}

/// Password derivation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    /// `argon2id`, `argon2i` or `argon2d`
    pub algorithm: String,
    /// Number of passes over memory
    pub iterations: u32,
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Digest length in bytes
    pub output_len: usize,
}
