//! Per-request authentication lifecycle
//!
//! A request moves through [`TokenVerified`], [`AccountResolved`] and
//! finally [`Authorized`]. Each step consumes or borrows the previous one,
//! so an ownership check can only happen on a loaded resource for a
//! requester whose account exists.

use board_db::{Account, AccountStore};
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::gate::{Authorized, Owned};

/// A request whose bearer token passed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenVerified {
    account_id: Uuid,
}

impl TokenVerified {
    pub(crate) fn new(account_id: Uuid) -> Self {
        Self { account_id }
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    /// Load the account the token was issued to
    pub async fn resolve<S>(self, store: &S) -> Result<AccountResolved, AuthError>
    where
        S: AccountStore + ?Sized,
    {
        let account = store
            .find_account_by_id(self.account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        debug!("Resolved account {} for request", account.id);
        Ok(AccountResolved { account })
    }
}

/// A verified requester whose account record was found
#[derive(Debug, Clone)]
pub struct AccountResolved {
    account: Account,
}

impl AccountResolved {
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_id(&self) -> Uuid {
        self.account.id
    }

    pub fn into_account(self) -> Account {
        self.account
    }

    /// Check that the requester owns `resource`
    pub fn authorize<T: Owned>(&self, resource: T) -> Result<Authorized<T>, AuthError> {
        Authorized::check(self.account.id, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_db::{Database, NewAccount, NewPost, PostStore};

    async fn setup() -> (Database, Account) {
        let db = Database::in_memory().await.unwrap();
        let account = db
            .insert_account(NewAccount {
                email: "a@x.com".to_string(),
                password_digest: "digest".to_string(),
                password_key: "k".repeat(64),
                name: "Ann".to_string(),
            })
            .await
            .unwrap();
        (db, account)
    }

    #[tokio::test]
    async fn test_resolve_existing_account() {
        let (db, account) = setup().await;
        let resolved = TokenVerified::new(account.id).resolve(&db).await.unwrap();
        assert_eq!(resolved.account().email, "a@x.com");
        assert_eq!(resolved.account_id(), account.id);
    }

    #[tokio::test]
    async fn test_resolve_missing_account() {
        let (db, _) = setup().await;
        let result = TokenVerified::new(Uuid::new_v4()).resolve(&db).await;
        assert!(matches!(result, Err(AuthError::AccountNotFound)));
    }

    #[tokio::test]
    async fn test_authorize_through_lifecycle() {
        let (db, account) = setup().await;
        let post = db
            .insert_post(NewPost {
                owner_id: account.id,
                title: "t".to_string(),
                content: "c".to_string(),
            })
            .await
            .unwrap();

        let resolved = TokenVerified::new(account.id).resolve(&db).await.unwrap();
        let authorized = resolved.authorize(post.clone()).unwrap();
        assert_eq!(authorized.get().id, post.id);

        let stranger = db
            .insert_account(NewAccount {
                email: "b@x.com".to_string(),
                password_digest: "digest".to_string(),
                password_key: "k".repeat(64),
                name: "Bob".to_string(),
            })
            .await
            .unwrap();
        let resolved = TokenVerified::new(stranger.id).resolve(&db).await.unwrap();
        assert!(matches!(
            resolved.authorize(post),
            Err(AuthError::Forbidden)
        ));
    }
}
