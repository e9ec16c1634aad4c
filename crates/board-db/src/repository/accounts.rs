//! Account operations

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{Account, AccountChanges, NewAccount};
use crate::repository::Database;
use crate::store::AccountStore;
use crate::utils::format_datetime;

/// Map a UNIQUE constraint violation on `email` to [`DbError::Duplicate`]
fn map_email_conflict(err: sqlx::Error, email: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::Duplicate(format!("Account '{}' already exists", email))
        }
        _ => DbError::from(err),
    }
}

#[async_trait]
impl AccountStore for Database {
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password_digest, password_key, name, created_at, updated_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Account::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password_digest, password_key, name, created_at, updated_at
            FROM accounts
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Account::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, DbError> {
        let now = Utc::now();

        // Check if account already exists
        let existing = self.find_account_by_email(&account.email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Account '{}' already exists",
                account.email
            )));
        }

        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_digest, password_key, name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&account.email)
        .bind(&account.password_digest)
        .bind(&account.password_key)
        .bind(&account.name)
        .bind(format_datetime(now))
        .bind(format_datetime(now))
        .execute(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &account.email))?;

        Ok(Account {
            id,
            email: account.email,
            password_digest: account.password_digest,
            password_key: account.password_key,
            name: account.name,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_account(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Option<Account>, DbError> {
        let now = Utc::now();
        let email = changes.email.clone().unwrap_or_default();
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = COALESCE(?, email),
                name = COALESCE(?, name),
                password_digest = COALESCE(?, password_digest),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.email)
        .bind(changes.name)
        .bind(changes.password_digest)
        .bind(format_datetime(now))
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &email))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_account_by_id(id).await
    }
}
