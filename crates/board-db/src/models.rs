//! Database models
//!
//! Plain value records. Persistence lives in [`crate::repository`]; nothing
//! here knows how it is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::utils::{parse_datetime, parse_uuid};

/// Account model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    /// Per-account derivation key (used as salt)
    #[serde(skip_serializing)]
    pub password_key: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New account (for insertion)
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_digest: String,
    pub password_key: String,
    pub name: String,
}

/// Partial account update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_digest: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.password_digest.is_none()
    }
}

/// Post ("board") model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Account that created the post
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New post (for insertion)
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Partial post update
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub owner_id: Uuid,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New comment (for insertion)
#[derive(Debug, Clone)]
pub struct NewComment {
    pub owner_id: Uuid,
    pub post_id: i64,
    pub content: String,
}

// ==================== TryFrom Implementations ====================

impl TryFrom<&sqlx::sqlite::SqliteRow> for Account {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: parse_uuid(&row.try_get::<String, _>("id")?)?,
            email: row.try_get("email")?,
            password_digest: row.try_get("password_digest")?,
            password_key: row.try_get("password_key")?,
            name: row.try_get("name")?,
            created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Post {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: row.try_get("id")?,
            owner_id: parse_uuid(&row.try_get::<String, _>("owner_id")?)?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Comment {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: row.try_get("id")?,
            owner_id: parse_uuid(&row.try_get::<String, _>("owner_id")?)?,
            post_id: row.try_get("post_id")?,
            content: row.try_get("content")?,
            created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
        })
    }
}
