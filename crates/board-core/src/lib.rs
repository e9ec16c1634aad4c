//! Board Server Core Business Logic
//!
//! This crate provides the resolvers behind the HTTP surface: account
//! registration and login, posts and comments with ownership-checked
//! mutations, and the read views returned to clients.

pub mod accounts;
pub mod comments;
pub mod error;
pub mod posts;
pub mod validate;
pub mod views;

pub use accounts::{AccountService, AccountUpdate, Registration};
pub use comments::CommentService;
pub use error::CoreError;
pub use posts::{PostDraft, PostService};
pub use views::{AccountView, AuthenticatedAccount, AuthorView, CommentView, PostView};

#[cfg(test)]
mod test_support;
