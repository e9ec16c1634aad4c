//! Post operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NewPost, Post, PostChanges};
use crate::repository::Database;
use crate::store::PostStore;
use crate::utils::format_datetime;

#[async_trait]
impl PostStore for Database {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Post::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Post::try_from(row).map_err(DbError::from))
            .collect()
    }

    async fn list_posts_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM posts
            WHERE owner_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Post::try_from(row).map_err(DbError::from))
            .collect()
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO posts (owner_id, title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(post.owner_id.to_string())
        .bind(&post.title)
        .bind(&post.content)
        .bind(format_datetime(now))
        .bind(format_datetime(now))
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Post {
            id,
            owner_id: post.owner_id,
            title: post.title,
            content: post.content,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE(?, title),
                content = COALESCE(?, content),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(format_datetime(now))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_post(id).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
