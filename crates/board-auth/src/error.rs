//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use board_db::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Any session token failure: bad signature, malformed, expired or not yet valid
    #[error("Token expired")]
    TokenInvalid,

    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthHeader,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account already exists")]
    AccountAlreadyExists,

    #[error("Wrong credentials")]
    WrongCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid auth configuration: {0}")]
    Config(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Store error: {0}")]
    Store(#[from] DbError),
}

impl AuthError {
    /// Stable machine-readable code reported to clients
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::TokenInvalid => "TOKEN_EXPIRED",
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => "UNAUTHORIZED",
            AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AuthError::AccountAlreadyExists => "ACCOUNT_EXISTS",
            AuthError::WrongCredentials => "WRONG_CREDENTIALS",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::Store(_) => "DATABASE_ERROR",
            AuthError::Config(_) | AuthError::PasswordHash(_) | AuthError::Jwt(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::TokenInvalid
            | AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::AccountAlreadyExists => StatusCode::CONFLICT,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Store(DbError::Duplicate(_)) => StatusCode::CONFLICT,
            AuthError::Store(DbError::NotFound(_)) => StatusCode::NOT_FOUND,
            AuthError::Store(_)
            | AuthError::Config(_)
            | AuthError::PasswordHash(_)
            | AuthError::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Internal detail stays in the logs
            AuthError::Store(_)
            | AuthError::Config(_)
            | AuthError::PasswordHash(_)
            | AuthError::Jwt(_) => {
                tracing::error!("Auth failure: {}", self);
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = axum::Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
