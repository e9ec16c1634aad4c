//! Authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::token::TokenCodec;

/// Extract bearer token from authorization header
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}

/// Authentication middleware
///
/// Verifies the bearer token when one is present and adds the resulting
/// [`crate::TokenVerified`] to request extensions. Requests without an
/// Authorization header pass through untouched; a header that is present but
/// fails verification ends the request.
pub async fn auth_middleware(
    State(codec): State<Arc<TokenCodec>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidAuthHeader)?),
        None => None,
    };

    if let Some(header) = auth_header {
        let token = extract_bearer_token(header)?;
        let verified = codec.verify(token)?;

        debug!("Authenticated account: {}", verified.account_id());

        request.extensions_mut().insert(verified);
    }

    Ok(next.run(request).await)
}
