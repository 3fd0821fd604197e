// ABOUTME: Server route handlers for listing, CRUD, and renewal
// ABOUTME: Listing includes derived daysRemaining, cycleDays, and status fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{RenewRequest, ServerInput, ServerUpdate};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Server routes handler
pub struct ServerRoutes;

impl ServerRoutes {
    /// Create all server routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/servers",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/servers/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .route("/api/servers/:id/renew", post(Self::handle_renew))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let servers = resources.server_service()?.list().await?;
        Ok((StatusCode::OK, Json(servers)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(input): Json<ServerInput>,
    ) -> Result<Response, AppError> {
        let server = resources.server_service()?.add(input).await?;
        Ok((StatusCode::CREATED, Json(server)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(update): Json<ServerUpdate>,
    ) -> Result<Response, AppError> {
        let server = resources.server_service()?.update(&id, update).await?;
        Ok((StatusCode::OK, Json(server)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        resources.server_service()?.delete(&id).await?;
        Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
    }

    async fn handle_renew(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(request): Json<RenewRequest>,
    ) -> Result<Response, AppError> {
        let server = resources.server_service()?.renew(&id, request).await?;
        Ok((StatusCode::OK, Json(server)).into_response())
    }
}
