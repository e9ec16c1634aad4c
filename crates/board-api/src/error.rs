//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use board_auth::AuthError;
use board_core::CoreError;
use board_db::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

fn auth_parts(e: &AuthError) -> (StatusCode, &'static str, String) {
    let message = match e {
        AuthError::Store(_)
        | AuthError::Config(_)
        | AuthError::PasswordHash(_)
        | AuthError::Jwt(_) => {
            error!("Auth failure: {}", e);
            "Internal error".to_string()
        }
        other => other.to_string(),
    };
    (e.status(), e.code(), message)
}

fn db_parts(e: &DbError) -> (StatusCode, &'static str, String) {
    match e {
        DbError::Duplicate(msg) => (StatusCode::CONFLICT, "DATABASE_ERROR", msg.clone()),
        DbError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        DbError::Connection(_) => {
            error!("Database failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Core(e) => match e {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
                CoreError::BadRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
                }
                CoreError::Auth(e) => auth_parts(e),
                CoreError::Database(e) => db_parts(e),
            },
            ApiError::Auth(e) => auth_parts(e),
        };

        let body = axum::Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
