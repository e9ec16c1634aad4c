//! API routes

mod accounts;
mod auth;
mod boards;
mod comments;
mod health;
pub mod metrics;
mod types;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use board_auth::auth_middleware;
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

pub use auth::{OptionalAuth, RequireAuth};

/// Request bodies are small JSON documents
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    // Bearer tokens are verified once here for every route that reads them
    let protected = Router::new()
        .merge(accounts::routes())
        .merge(boards::routes())
        .merge(comments::routes())
        .layer(middleware::from_fn_with_state(
            state.codec.clone(),
            auth_middleware,
        ));

    // Login must keep working for a client still holding a stale token
    let public = Router::new()
        .merge(auth::routes())
        .merge(comments::public_routes());

    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use board_auth::{PasswordHashConfig, PasswordHasher, TokenCodec};
    use board_db::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> (Router, Arc<TokenCodec>) {
        let db = Database::in_memory().await.unwrap();
        let hasher = PasswordHasher::new(&PasswordHashConfig {
            algorithm: "argon2id".to_string(),
            iterations: 1,
            memory_kib: 64,
            output_len: 32,
        })
        .unwrap();
        let codec = Arc::new(TokenCodec::new("test-secret-key", 3600).unwrap());
        let state = AppState::new(db, Arc::new(hasher), codec.clone());
        (create_router(state, None), codec)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn sign_up(app: &Router, email: &str, name: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({"email": email, "password": "secret", "name": name})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"success": true}));

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": email, "password": "secret"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "ok");
    }

    #[tokio::test]
    async fn test_register_login_and_me() {
        let (app, codec) = test_app().await;
        let token = sign_up(&app, "a@x.com", "Ann").await;

        let (status, body) = send(&app, Method::GET, "/api/v1/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        assert!(body.get("password_digest").is_none());
        assert!(body.get("password_key").is_none());
        assert_eq!(
            body["id"].as_str().unwrap(),
            codec.verify(&token).unwrap().account_id().to_string()
        );

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/me",
            Some(&token),
            Some(json!({"name": "Anne"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Anne");
        assert_eq!(body["expires_in"], 3600);
        assert!(body["token"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let (app, _) = test_app().await;
        sign_up(&app, "a@x.com", "Ann").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({"email": "a@x.com", "password": "other", "name": "Another"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "ACCOUNT_EXISTS");
    }

    #[tokio::test]
    async fn test_wrong_credentials() {
        let (app, _) = test_app().await;
        sign_up(&app, "a@x.com", "Ann").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "a@x.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "WRONG_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_auth_required_and_bad_token() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/v1/boards", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, body) =
            send(&app, Method::GET, "/api/v1/boards", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn test_stale_token_ignored_on_public_routes() {
        let (app, codec) = test_app().await;
        let stale = codec
            .issue_at(uuid::Uuid::new_v4(), chrono::Utc::now() - chrono::Duration::hours(2))
            .unwrap();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            Some(&stale),
            Some(json!({"email": "a@x.com", "password": "secret", "name": "Ann"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            Some(&stale),
            Some(json!({"email": "a@x.com", "password": "secret"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        send(
            &app,
            Method::POST,
            "/api/v1/boards",
            Some(&token),
            Some(json!({"title": "hello", "content": "world"})),
        )
        .await;
        let (_, boards) = send(&app, Method::GET, "/api/v1/boards", Some(&token), None).await;
        let board_id = boards[0]["id"].as_i64().unwrap();

        let comments_uri = format!("/api/v1/boards/{}/comments", board_id);
        let (status, body) = send(&app, Method::GET, &comments_uri, Some(&stale), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        // Writing a comment still needs a valid token
        let (status, body) = send(
            &app,
            Method::POST,
            &comments_uri,
            Some(&stale),
            Some(json!({"content": "late"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");

        // A board read with a bad token is still refused
        let board_uri = format!("/api/v1/boards/{}", board_id);
        let (status, body) = send(&app, Method::GET, &board_uri, Some(&stale), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn test_board_lifecycle_and_ownership() {
        let (app, _) = test_app().await;
        let alice = sign_up(&app, "a@x.com", "Ann").await;
        let bob = sign_up(&app, "b@x.com", "Bob").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/boards",
            Some(&alice),
            Some(json!({"title": "hello", "content": "world"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::GET, "/api/v1/boards/mine", Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);
        let board_id = body[0]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/boards/{}", board_id);

        let (_, body) = send(&app, Method::GET, &uri, Some(&alice), None).await;
        assert_eq!(body["is_write"], true);
        assert_eq!(body["author"]["name"], "Ann");
        let (_, body) = send(&app, Method::GET, &uri, Some(&bob), None).await;
        assert_eq!(body["is_write"], false);
        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_write"], false);

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&bob),
            Some(json!({"title": "mine now"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&alice),
            Some(json!({"title": "renamed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_comments() {
        let (app, _) = test_app().await;
        let alice = sign_up(&app, "a@x.com", "Ann").await;
        let bob = sign_up(&app, "b@x.com", "Bob").await;

        send(
            &app,
            Method::POST,
            "/api/v1/boards",
            Some(&alice),
            Some(json!({"title": "hello", "content": "world"})),
        )
        .await;
        let (_, boards) = send(&app, Method::GET, "/api/v1/boards", Some(&alice), None).await;
        let board_id = boards[0]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/boards/{}/comments", board_id);

        let (status, _) = send(
            &app,
            Method::POST,
            &uri,
            Some(&bob),
            Some(json!({"content": "first!"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, comments) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(comments[0]["content"], "first!");
        assert_eq!(comments[0]["author"]["name"], "Bob");
        let comment_uri = format!("{}/{}", uri, comments[0]["id"].as_i64().unwrap());

        let (status, _) = send(
            &app,
            Method::PUT,
            &comment_uri,
            Some(&alice),
            Some(json!({"content": "edited"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::DELETE, &comment_uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, comments) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(comments, json!([]));
    }
}
