// ABOUTME: Route module organization for the dashboard HTTP API
// ABOUTME: Composes public and session-protected routers with tracing, request ids, and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Route module for the expiry dashboard
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the service layer. Everything under `/api` except the auth
//! endpoints sits behind [`require_session`].

/// Login status and session issue
pub mod auth;
/// Category CRUD and reordering
pub mod categories;
/// Liveness
pub mod health;
/// Expiry sweep and test message triggers
pub mod notifications;
/// Server CRUD and renewal
pub mod servers;
/// Settings and external config status
pub mod settings;

pub use auth::AuthRoutes;
pub use categories::CategoryRoutes;
pub use health::HealthRoutes;
pub use notifications::NotificationRoutes;
pub use servers::ServerRoutes;
pub use settings::SettingsRoutes;

use crate::middleware::{require_session, setup_cors};
use crate::resources::ServerResources;
use axum::{middleware, Router};
use http::HeaderName;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let protected = Router::new()
        .merge(ServerRoutes::routes(Arc::clone(&resources)))
        .merge(CategoryRoutes::routes(Arc::clone(&resources)))
        .merge(SettingsRoutes::routes(Arc::clone(&resources)))
        .merge(NotificationRoutes::routes(Arc::clone(&resources)))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&resources),
            require_session,
        ));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(protected)
        .layer(setup_cors(&resources.config))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
