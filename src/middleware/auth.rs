// ABOUTME: Session authentication middleware for dashboard API routes
// ABOUTME: Accepts the token from the auth_token cookie or a Bearer Authorization header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::constants::session::AUTH_COOKIE;
use crate::resources::ServerResources;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Value of cookie `name` from the `Cookie` headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}

/// Session token from the cookie, falling back to the Authorization header
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    get_cookie_value(headers, AUTH_COOKIE).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(ToOwned::to_owned)
    })
}

/// Reject the request unless login is off or the session token verifies
///
/// # Example
///
/// ```rust,no_run
/// use axum::{middleware, routing::get, Router};
/// use expiry_dashboard::middleware::require_session;
/// use expiry_dashboard::resources::ServerResources;
/// use std::sync::Arc;
///
/// # async fn handler() -> &'static str { "" }
/// # fn example(resources: Arc<ServerResources>) {
/// let app: Router = Router::new()
///     .route("/api/servers", get(handler))
///     .layer(middleware::from_fn_with_state(resources, require_session));
/// # }
/// ```
pub async fn require_session(
    State(resources): State<Arc<ServerResources>>,
    req: Request,
    next: Next,
) -> Response {
    let token = extract_token(req.headers());
    match resources
        .auth_service()
        .verify(token.as_deref(), Utc::now())
        .await
    {
        Ok(()) => next.run(req).await,
        Err(e) => {
            debug!(path = %req.uri().path(), error = %e, "Session check failed");
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def"),
        );
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer other"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_extract_token_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer 1.ff"));
        assert_eq!(extract_token(&headers).as_deref(), Some("1.ff"));
        assert!(extract_token(&HeaderMap::new()).is_none());
    }
}
