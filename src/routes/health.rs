// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports liveness and key-value store reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let storage = match &resources.store {
            Some(store) => match store.health_check().await {
                Ok(()) => json!({ "backend": store.backend_name(), "status": "ok" }),
                Err(e) => json!({
                    "backend": store.backend_name(),
                    "status": "error",
                    "message": e.message,
                }),
            },
            None => json!({ "backend": "none", "status": "unconfigured" }),
        };

        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "storage": storage,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
