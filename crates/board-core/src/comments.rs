//! Comment resolvers
//!
//! Comments are always addressed through their parent post.

use std::sync::Arc;

use board_auth::TokenVerified;
use board_db::{Comment, CommentStore, NewComment, PostStore, Store};
use tracing::info;

use crate::error::CoreError;
use crate::validate::validate_content;
use crate::views::{AuthorDirectory, CommentView};

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn Store>,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Comments of a post, oldest first
    pub async fn list(&self, post_id: i64) -> Result<Vec<CommentView>, CoreError> {
        self.ensure_post(post_id).await?;

        let mut directory = AuthorDirectory::new(self.store.as_ref());
        let mut views = Vec::new();
        for comment in self.store.list_comments(post_id).await? {
            views.push(directory.comment_view(comment).await?);
        }
        Ok(views)
    }

    pub async fn create(
        &self,
        verified: TokenVerified,
        post_id: i64,
        content: String,
    ) -> Result<Comment, CoreError> {
        validate_content(&content)?;
        let requester = verified.resolve(self.store.as_ref()).await?;
        self.ensure_post(post_id).await?;

        let comment = self
            .store
            .insert_comment(NewComment {
                owner_id: requester.account_id(),
                post_id,
                content,
            })
            .await?;

        info!(
            "Account {} commented {} on post {}",
            comment.owner_id, comment.id, post_id
        );
        Ok(comment)
    }

    pub async fn update(
        &self,
        verified: TokenVerified,
        post_id: i64,
        comment_id: i64,
        content: String,
    ) -> Result<Comment, CoreError> {
        validate_content(&content)?;
        let requester = verified.resolve(self.store.as_ref()).await?;
        self.ensure_post(post_id).await?;
        let comment = requester.authorize(self.find(post_id, comment_id).await?)?;

        let updated = self
            .store
            .update_comment(comment.get().id, &content)
            .await?
            .ok_or_else(|| comment_not_found(comment_id))?;

        info!("Account {} updated comment {}", requester.account_id(), comment_id);
        Ok(updated)
    }

    pub async fn delete(
        &self,
        verified: TokenVerified,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), CoreError> {
        let requester = verified.resolve(self.store.as_ref()).await?;
        self.ensure_post(post_id).await?;
        let comment = requester.authorize(self.find(post_id, comment_id).await?)?;

        if !self.store.delete_comment(comment.get().id).await? {
            return Err(comment_not_found(comment_id));
        }

        info!("Account {} deleted comment {}", requester.account_id(), comment_id);
        Ok(())
    }

    async fn ensure_post(&self, post_id: i64) -> Result<(), CoreError> {
        match self.store.find_post(post_id).await? {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound(format!("board {}", post_id))),
        }
    }

    async fn find(&self, post_id: i64, comment_id: i64) -> Result<Comment, CoreError> {
        self.store
            .find_comment(post_id, comment_id)
            .await?
            .ok_or_else(|| comment_not_found(comment_id))
    }
}

fn comment_not_found(comment_id: i64) -> CoreError {
    CoreError::NotFound(format!("comment {}", comment_id))
}
