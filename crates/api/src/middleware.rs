use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use bookshelf_auth::TokenVerifier;
use bookshelf_resolvers::RequestContext;

use crate::app::errors::json_error;

/// Request header carrying the authentication token.
pub const TOKEN_HEADER: &str = "token";

#[derive(Clone)]
pub struct IdentityState {
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Attach a [`RequestContext`] to every request.
///
/// No `Token` header means an anonymous caller. A header that fails
/// verification rejects the request with 401; it never falls back to
/// anonymous.
pub async fn identity_middleware(
    State(state): State<IdentityState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let identity = match extract_token(req.headers())? {
        None => None,
        Some(token) => {
            let identity = state.verifier.verify(token, Utc::now()).map_err(|e| {
                tracing::warn!(error = %e, "rejecting request with invalid token");
                invalid_token()
            })?;
            Some(identity)
        }
    };

    req.extensions_mut().insert(RequestContext::from(identity));

    Ok(next.run(req).await)
}

fn extract_token(headers: &HeaderMap) -> Result<Option<&str>, Response> {
    let Some(header) = headers.get(TOKEN_HEADER) else {
        return Ok(None);
    };

    let token = header.to_str().map_err(|_| invalid_token())?.trim();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token))
}

fn invalid_token() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_token",
        "authentication token could not be verified",
    )
}
