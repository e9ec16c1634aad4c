//! Board Server Authentication and Authorization
//!
//! This crate holds the auth core of the board server: keyed password
//! derivation, signed session tokens, the ownership gate, and the typed
//! per-request lifecycle that ties them to the account store.

pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

pub use config::{AuthConfig, PasswordHashConfig};
pub use error::AuthError;
pub use gate::{authorize, Authorized, Owned};
pub use middleware::{auth_middleware, extract_bearer_token};
pub use password::PasswordHasher;
pub use session::{AccountResolved, TokenVerified};
pub use token::{Claims, TokenCodec};
