// ABOUTME: HTTP middleware for the dashboard API
// ABOUTME: Session authentication guarding data routes and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

/// Session token authentication
pub mod auth;
/// Cross-origin request configuration
pub mod cors;

pub use auth::{extract_token, get_cookie_value, require_session};
pub use cors::setup_cors;
