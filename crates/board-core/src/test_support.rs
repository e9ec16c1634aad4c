//! Shared fixtures for service tests

use std::sync::Arc;

use board_auth::{PasswordHashConfig, PasswordHasher, TokenCodec, TokenVerified};
use board_db::{Database, Store};

use crate::accounts::{AccountService, Registration};
use crate::comments::CommentService;
use crate::posts::PostService;
use crate::views::AccountView;

pub(crate) struct TestContext {
    pub db: Database,
    pub hasher: Arc<PasswordHasher>,
    pub codec: Arc<TokenCodec>,
}

impl TestContext {
    pub async fn new() -> Self {
        let hasher = PasswordHasher::new(&PasswordHashConfig {
            algorithm: "argon2id".to_string(),
            iterations: 1,
            memory_kib: 64,
            output_len: 32,
        })
        .unwrap();

        Self {
            db: Database::in_memory().await.unwrap(),
            hasher: Arc::new(hasher),
            codec: Arc::new(TokenCodec::new("test-secret-key", 3600).unwrap()),
        }
    }

    fn store(&self) -> Arc<dyn Store> {
        Arc::new(self.db.clone())
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.store(), self.hasher.clone(), self.codec.clone())
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.store())
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.store())
    }

    /// Register an account with password "secret" and log it in
    pub async fn signed_up(&self, email: &str, name: &str) -> (AccountView, TokenVerified) {
        let accounts = self.accounts();
        let account = accounts
            .register(Registration {
                email: email.to_string(),
                password: "secret".to_string(),
                name: name.to_string(),
            })
            .await
            .unwrap();
        let session = accounts.login(email, "secret").await.unwrap();
        let verified = self.codec.verify(&session.token).unwrap();
        (account, verified)
    }
}
