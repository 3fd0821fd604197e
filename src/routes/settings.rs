// ABOUTME: Settings route handlers and external config status
// ABOUTME: Reading settings first runs the external-config cleanup check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::errors::AppError;
use crate::models::Settings;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

/// Settings routes handler
pub struct SettingsRoutes;

impl SettingsRoutes {
    /// Create all settings routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/settings",
                get(Self::handle_get).put(Self::handle_save),
            )
            .route("/api/config/external", get(Self::handle_external))
            .with_state(resources)
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        resources.external_monitor()?.check(Utc::now()).await?;
        let view = resources.settings_service()?.view().await?;
        Ok((StatusCode::OK, Json(view)).into_response())
    }

    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        Json(settings): Json<Settings>,
    ) -> Result<Response, AppError> {
        let view = resources.settings_service()?.save(settings).await?;
        Ok((StatusCode::OK, Json(view)).into_response())
    }

    async fn handle_external(State(resources): State<Arc<ServerResources>>) -> Response {
        let snapshot = resources.secrets.resolver().snapshot(Utc::now());
        (StatusCode::OK, Json(snapshot)).into_response()
    }
}
