//! Comment routes, nested under their board

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use board_core::CommentView;

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::RequireAuth;
use super::types::{CommentRequest, SuccessResponse};

/// GET /api/v1/boards/{board_id}/comments
async fn list_comments(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(state.comments.list(board_id).await?))
}

/// POST /api/v1/boards/{board_id}/comments
async fn create_comment(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    state
        .comments
        .create(verified, board_id, request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

/// PUT /api/v1/boards/{board_id}/comments/{comment_id}
async fn update_comment(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Path((board_id, comment_id)): Path<(i64, i64)>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .comments
        .update(verified, board_id, comment_id, request.content)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/v1/boards/{board_id}/comments/{comment_id}
async fn delete_comment(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Path((board_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .comments
        .delete(verified, board_id, comment_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Comment routes that never read a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/v1/boards/{board_id}/comments", get(list_comments))
}

/// Comment routes behind bearer verification
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/boards/{board_id}/comments", post(create_comment))
        .route(
            "/api/v1/boards/{board_id}/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
}
