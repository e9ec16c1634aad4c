//! Store traits
//!
//! The rest of the workspace depends on these traits rather than on
//! [`crate::Database`]. Every lookup distinguishes "not found" (`Ok(None)`)
//! from a store failure (`Err`).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{
    Account, AccountChanges, Comment, NewAccount, NewComment, NewPost, Post, PostChanges,
};

/// Credential store access
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its identifier
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, DbError>;

    /// Look up an account by login email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError>;

    /// Persist a new account; fails with [`DbError::Duplicate`] on an email collision
    async fn insert_account(&self, account: NewAccount) -> Result<Account, DbError>;

    /// Apply a partial update, returning the updated record if it exists
    async fn update_account(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Option<Account>, DbError>;
}

/// Post persistence
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, DbError>;

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<Post>, DbError>;

    /// Posts created by one account, newest first
    async fn list_posts_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, DbError>;

    async fn insert_post(&self, post: NewPost) -> Result<Post, DbError>;

    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, DbError>;

    /// Delete a post together with its comments
    async fn delete_post(&self, id: i64) -> Result<bool, DbError>;
}

/// Comment persistence
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Look up a comment under a specific post
    async fn find_comment(&self, post_id: i64, comment_id: i64)
    -> Result<Option<Comment>, DbError>;

    /// Comments of a post, oldest first
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DbError>;

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, DbError>;

    async fn update_comment(&self, id: i64, content: &str) -> Result<Option<Comment>, DbError>;

    async fn delete_comment(&self, id: i64) -> Result<bool, DbError>;
}

/// Everything the resolvers need from persistence
pub trait Store: AccountStore + PostStore + CommentStore {}

impl<T> Store for T where T: AccountStore + PostStore + CommentStore {}
