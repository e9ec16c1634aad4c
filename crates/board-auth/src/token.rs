//! Session token issuing and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::session::TokenVerified;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Why a token was refused. Only ever logged; callers see [`AuthError::TokenInvalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenRejection {
    BadSignature,
    Expired,
    NotYetValid,
    Malformed,
}

impl From<&ErrorKind> for TokenRejection {
    fn from(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidSignature => TokenRejection::BadSignature,
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            ErrorKind::ImmatureSignature => TokenRejection::NotYetValid,
            _ => TokenRejection::Malformed,
        }
    }
}

/// Signs and checks session tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    /// Create a codec from a signing secret and a token lifetime
    pub fn new(secret: &str, lifetime_secs: i64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Config("JWT secret must not be empty".to_string()));
        }
        if lifetime_secs <= 0 {
            return Err(AuthError::Config(
                "Token lifetime must be positive".to_string(),
            ));
        }
        let lifetime = Duration::try_seconds(lifetime_secs)
            .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
            .ok_or_else(|| {
                AuthError::Config(format!("Token lifetime out of range: {}s", lifetime_secs))
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        })
    }

    /// Configured token lifetime in seconds
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Issue a token for an account, valid from now
    pub fn issue(&self, account_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, account_id: Uuid, now: DateTime<Utc>) -> Result<String, AuthError> {
        let exp = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AuthError::Config("Token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
        };

        debug!("Issuing token for account: {}", account_id);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Verify a token and return the account it was issued to
    ///
    /// Does not check that the account still exists.
    pub fn verify(&self, token: &str) -> Result<TokenVerified, AuthError> {
        let account_id = self.decode_subject(token).map_err(|reason| {
            debug!("Rejected session token: {:?}", reason);
            metrics::counter!("board_token_rejections_total").increment(1);
            AuthError::TokenInvalid
        })?;

        Ok(TokenVerified::new(account_id))
    }

    fn decode_subject(&self, token: &str) -> Result<Uuid, TokenRejection> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenRejection::from(e.kind()))?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenRejection::Malformed)
    }
}
