// ABOUTME: Notification route handlers to run the expiry sweep or send a test message
// ABOUTME: The manual sweep performs the same external-config check as the scheduler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

/// Notification routes handler
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/notifications/check", post(Self::handle_check))
            .route("/api/notifications/test", post(Self::handle_test))
            .with_state(resources)
    }

    async fn handle_check(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let now = Utc::now();
        resources.external_monitor()?.check(now).await?;
        let report = resources
            .notification_service()?
            .check_and_notify(now)
            .await?;
        Ok((StatusCode::OK, Json(report)).into_response())
    }

    async fn handle_test(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        resources
            .notification_service()?
            .send_test(Utc::now())
            .await?;
        Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
    }
}
