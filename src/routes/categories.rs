// ABOUTME: Category route handlers for CRUD and display reordering
// ABOUTME: Deleting a category reports how many servers moved to the default bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::CategoryInput;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// New display order
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Category ids, first shown first
    pub ids: Vec<String>,
}

/// Category routes handler
pub struct CategoryRoutes;

impl CategoryRoutes {
    /// Create all category routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/categories",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/categories/reorder", post(Self::handle_reorder))
            .route(
                "/api/categories/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let categories = resources.category_service()?.list().await?;
        Ok((StatusCode::OK, Json(categories)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(input): Json<CategoryInput>,
    ) -> Result<Response, AppError> {
        let category = resources.category_service()?.add(input).await?;
        Ok((StatusCode::CREATED, Json(category)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(input): Json<CategoryInput>,
    ) -> Result<Response, AppError> {
        let category = resources.category_service()?.update(&id, input).await?;
        Ok((StatusCode::OK, Json(category)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let moved = resources.category_service()?.delete(&id).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "serversMoved": moved })),
        )
            .into_response())
    }

    async fn handle_reorder(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ReorderRequest>,
    ) -> Result<Response, AppError> {
        let categories = resources
            .category_service()?
            .reorder(&request.ids)
            .await?;
        Ok((StatusCode::OK, Json(categories)).into_response())
    }
}
