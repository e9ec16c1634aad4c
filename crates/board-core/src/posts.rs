//! Post ("board") resolvers

use std::sync::Arc;

use board_auth::TokenVerified;
use board_db::{NewPost, Post, PostChanges, PostStore, Store};
use tracing::info;

use crate::error::CoreError;
use crate::validate::{validate_content, validate_title};
use crate::views::{AuthorDirectory, PostView};

/// A new post
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All posts, newest first, with authors and comments
    pub async fn list(&self, verified: TokenVerified) -> Result<Vec<PostView>, CoreError> {
        let requester = verified.resolve(self.store.as_ref()).await?;
        let posts = self.store.list_posts().await?;
        self.views(posts, requester.account_id()).await
    }

    /// The requester's own posts, newest first. Empty when there are none.
    pub async fn list_mine(&self, verified: TokenVerified) -> Result<Vec<PostView>, CoreError> {
        let requester = verified.resolve(self.store.as_ref()).await?;
        let posts = self.store.list_posts_by_owner(requester.account_id()).await?;
        self.views(posts, requester.account_id()).await
    }

    /// A single post; `is_write` is set when the requester owns it
    pub async fn get(
        &self,
        post_id: i64,
        requester: Option<TokenVerified>,
    ) -> Result<PostView, CoreError> {
        let post = self.find(post_id).await?;
        AuthorDirectory::new(self.store.as_ref())
            .post_view(post, requester.map(|v| v.account_id()))
            .await
    }

    pub async fn create(&self, verified: TokenVerified, draft: PostDraft) -> Result<Post, CoreError> {
        validate_title(&draft.title)?;
        validate_content(&draft.content)?;
        let requester = verified.resolve(self.store.as_ref()).await?;

        let post = self
            .store
            .insert_post(NewPost {
                owner_id: requester.account_id(),
                title: draft.title,
                content: draft.content,
            })
            .await?;

        info!("Account {} created post {}", post.owner_id, post.id);
        Ok(post)
    }

    /// Update title and/or content of a post the requester owns
    pub async fn update(
        &self,
        verified: TokenVerified,
        post_id: i64,
        changes: PostChanges,
    ) -> Result<Post, CoreError> {
        if let Some(title) = &changes.title {
            validate_title(title)?;
        }
        if let Some(content) = &changes.content {
            validate_content(content)?;
        }

        let requester = verified.resolve(self.store.as_ref()).await?;
        let post = requester.authorize(self.find(post_id).await?)?;

        let updated = self
            .store
            .update_post(post.get().id, changes)
            .await?
            .ok_or_else(|| not_found(post_id))?;

        info!("Account {} updated post {}", requester.account_id(), post_id);
        Ok(updated)
    }

    /// Delete a post the requester owns, together with its comments
    pub async fn delete(&self, verified: TokenVerified, post_id: i64) -> Result<(), CoreError> {
        let requester = verified.resolve(self.store.as_ref()).await?;
        let post = requester.authorize(self.find(post_id).await?)?;

        if !self.store.delete_post(post.get().id).await? {
            return Err(not_found(post_id));
        }

        info!("Account {} deleted post {}", requester.account_id(), post_id);
        Ok(())
    }

    async fn find(&self, post_id: i64) -> Result<Post, CoreError> {
        self.store
            .find_post(post_id)
            .await?
            .ok_or_else(|| not_found(post_id))
    }

    async fn views(&self, posts: Vec<Post>, requester: uuid::Uuid) -> Result<Vec<PostView>, CoreError> {
        let mut directory = AuthorDirectory::new(self.store.as_ref());
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(directory.post_view(post, Some(requester)).await?);
        }
        Ok(views)
    }
}

fn not_found(post_id: i64) -> CoreError {
    CoreError::NotFound(format!("board {}", post_id))
}
