//! Comment operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Comment, NewComment};
use crate::repository::Database;
use crate::store::CommentStore;
use crate::utils::format_datetime;

#[async_trait]
impl CommentStore for Database {
    async fn find_comment(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Option<Comment>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, owner_id, post_id, content, created_at, updated_at
            FROM comments
            WHERE id = ? AND post_id = ?
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Comment::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, post_id, content, created_at, updated_at
            FROM comments
            WHERE post_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Comment::try_from(row).map_err(DbError::from))
            .collect()
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO comments (owner_id, post_id, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(comment.owner_id.to_string())
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(format_datetime(now))
        .bind(format_datetime(now))
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Comment {
            id,
            owner_id: comment.owner_id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Option<Comment>, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, owner_id, post_id, content, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(format_datetime(now))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Comment::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
