//! Application state

use board_auth::{PasswordHasher, TokenCodec};
use board_core::{AccountService, CommentService, PostService};
use board_db::{Database, Store};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Handle used to render Prometheus metrics
pub type MetricsHandle = PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub codec: Arc<TokenCodec>,
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl AppState {
    pub fn new(db: Database, hasher: Arc<PasswordHasher>, codec: Arc<TokenCodec>) -> Self {
        let store: Arc<dyn Store> = Arc::new(db.clone());

        Self {
            accounts: Arc::new(AccountService::new(
                store.clone(),
                hasher,
                codec.clone(),
            )),
            posts: Arc::new(PostService::new(store.clone())),
            comments: Arc::new(CommentService::new(store)),
            db,
            codec,
        }
    }
}
