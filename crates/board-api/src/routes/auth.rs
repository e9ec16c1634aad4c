//! Authentication extractors and routes

use axum::{
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
    routing::post,
    Json, Router,
};
use board_auth::{AuthError, TokenVerified};
use board_core::AuthenticatedAccount;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{LoginRequest, RegisterRequest, SuccessResponse};

// ==================== Auth Extractors ====================

/// Extractor for an authenticated requester (required)
///
/// The bearer token itself is checked by `board_auth::auth_middleware`,
/// which leaves a [`TokenVerified`] in the request extensions.
pub struct RequireAuth(pub TokenVerified);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let verified = parts
            .extensions
            .get::<TokenVerified>()
            .copied()
            .ok_or(AuthError::MissingAuthHeader)?;

        debug!("Request by account: {}", verified.account_id());
        Ok(RequireAuth(verified))
    }
}

/// Extractor for an optional requester
pub struct OptionalAuth(pub Option<TokenVerified>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<TokenVerified>().copied()))
    }
}

// ==================== Auth Routes ====================

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    state.accounts.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthenticatedAccount>, ApiError> {
    let session = state
        .accounts
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(session))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
}
