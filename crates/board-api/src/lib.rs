//! Board Server REST API
//!
//! This crate provides the Axum-based HTTP API for the board server:
//! accounts, boards (posts) and comments, plus health and metrics endpoints.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
