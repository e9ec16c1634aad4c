//! Board Server Database Layer
//!
//! This crate provides the persistence layer for the board server:
//! accounts, posts and comments stored in SQLite via sqlx, exposed to
//! the rest of the workspace through the store traits in [`store`].

pub mod error;
pub mod models;
pub mod repository;
pub mod store;
mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::Database;
pub use store::{AccountStore, CommentStore, PostStore, Store};
