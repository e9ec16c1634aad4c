//! Board (post) routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use board_core::PostView;

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::{OptionalAuth, RequireAuth};
use super::types::{CreateBoardRequest, SuccessResponse, UpdateBoardRequest};

/// GET /api/v1/boards
async fn list_boards(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.posts.list(verified).await?))
}

/// GET /api/v1/boards/mine
async fn my_boards(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.posts.list_mine(verified).await?))
}

/// GET /api/v1/boards/{board_id}
async fn get_board(
    OptionalAuth(verified): OptionalAuth,
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<PostView>, ApiError> {
    Ok(Json(state.posts.get(board_id, verified).await?))
}

/// POST /api/v1/boards
async fn create_board(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    state.posts.create(verified, request.into()).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

/// PUT /api/v1/boards/{board_id}
async fn update_board(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    Json(request): Json<UpdateBoardRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .posts
        .update(verified, board_id, request.into())
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/v1/boards/{board_id}
async fn delete_board(
    RequireAuth(verified): RequireAuth,
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.posts.delete(verified, board_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Create board routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/boards", get(list_boards).post(create_board))
        .route("/api/v1/boards/mine", get(my_boards))
        .route(
            "/api/v1/boards/{board_id}",
            get(get_board).put(update_board).delete(delete_board),
        )
}
