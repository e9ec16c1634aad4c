//! Read models returned to clients
//!
//! None of these carry the password digest or key.

use std::collections::HashMap;

use board_db::{Account, AccountStore, Comment, CommentStore, DbError, Post, Store};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;

/// Public view of an account
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// An account together with a freshly issued session token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedAccount {
    pub user: AccountView,
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Author shown next to posts and comments
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorView {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub author: AuthorView,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i64,
    pub author: AuthorView,
    pub title: String,
    pub content: String,
    pub comments: Vec<CommentView>,
    /// Whether the requester owns this post
    pub is_write: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resolves owner ids to authors, loading each account at most once
pub(crate) struct AuthorDirectory<'a> {
    store: &'a dyn Store,
    known: HashMap<Uuid, AuthorView>,
}

impl<'a> AuthorDirectory<'a> {
    pub(crate) fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            known: HashMap::new(),
        }
    }

    pub(crate) async fn author(&mut self, id: Uuid) -> Result<AuthorView, CoreError> {
        if let Some(author) = self.known.get(&id) {
            return Ok(author.clone());
        }

        // Accounts are never deleted, so a dangling owner is a store inconsistency
        let account = self
            .store
            .find_account_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("account {}", id)))?;

        let author = AuthorView {
            id: account.id,
            name: account.name,
        };
        self.known.insert(id, author.clone());
        Ok(author)
    }

    pub(crate) async fn comment_view(&mut self, comment: Comment) -> Result<CommentView, CoreError> {
        let author = self.author(comment.owner_id).await?;
        Ok(CommentView {
            id: comment.id,
            post_id: comment.post_id,
            author,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }

    /// Build the full view of a post, comments oldest first
    pub(crate) async fn post_view(
        &mut self,
        post: Post,
        requester: Option<Uuid>,
    ) -> Result<PostView, CoreError> {
        let author = self.author(post.owner_id).await?;

        let mut comments = Vec::new();
        for comment in self.store.list_comments(post.id).await? {
            comments.push(self.comment_view(comment).await?);
        }

        Ok(PostView {
            id: post.id,
            is_write: requester == Some(post.owner_id),
            author,
            title: post.title,
            content: post.content,
            comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}
