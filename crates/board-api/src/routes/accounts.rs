//! Current-account routes

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use board_core::{AccountView, AuthenticatedAccount};

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::RequireAuth;
use super::types::UpdateAccountRequest;

/// GET /api/v1/me
async fn get_me(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<AccountView>, ApiError> {
    Ok(Json(state.accounts.current(verified).await?))
}

/// PUT /api/v1/me
///
/// Returns the updated account with a freshly issued token.
async fn update_me(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<AuthenticatedAccount>, ApiError> {
    Ok(Json(state.accounts.update(verified, request.into()).await?))
}

/// Create account routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/me", get(get_me).put(update_me))
}
