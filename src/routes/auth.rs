// ABOUTME: Authentication route handlers for login status, login, and logout
// ABOUTME: The issued token is returned in the body and set as an HttpOnly cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::constants::session::AUTH_COOKIE;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Submitted password
    #[serde(default)]
    pub password: String,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the public authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/status", get(Self::handle_status))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    async fn handle_status(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let status = resources.auth_service().status().await?;
        Ok((StatusCode::OK, Json(status)).into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_service();
        let issued = auth.login(&request.password, Utc::now()).await?;

        let cookie = format!(
            "{AUTH_COOKIE}={}; HttpOnly; Path=/; SameSite=Strict; Max-Age={}",
            issued.token,
            auth.ttl().num_seconds()
        );
        let mut response = (StatusCode::OK, Json(issued)).into_response();
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        Ok(response)
    }

    async fn handle_logout() -> Response {
        let mut response = (StatusCode::OK, Json(json!({ "success": true }))).into_response();
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_static("auth_token=; HttpOnly; Path=/; SameSite=Strict; Max-Age=0"),
        );
        response
    }
}
