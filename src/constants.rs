// ABOUTME: System-wide constants and environment defaults for the expiry dashboard
// ABOUTME: Ports, storage, scheduler, session, and Telegram API defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! # Constants Module
//!
//! Hardcoded defaults. Environment lookups live in `config::environment`.

pub use expiry_core::constants::{defaults, embedded, secret_env, storage_keys};

/// Service identity used in logs
pub mod service_names {
    /// Service name reported by structured logs
    pub const EXPIRY_DASHBOARD: &str = "expiry-dashboard";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// Scheduler defaults
pub mod scheduler {
    /// One sweep per day
    pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 86_400;
}

/// Session token settings
pub mod session {
    /// Cookie carrying the session token
    pub const AUTH_COOKIE: &str = "auth_token";
    /// Token lifetime
    pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;
    /// Salt mixed into the token hash
    pub const DEFAULT_TOKEN_SALT: &str = "expiry-dashboard-session";
}

/// Telegram Bot API
pub mod telegram {
    /// Public Bot API endpoint
    pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
    /// Parse mode used for every message
    pub const PARSE_MODE: &str = "HTML";
    /// Service label used in error messages
    pub const SERVICE_NAME: &str = "Telegram";
}

/// Redis backend defaults
pub mod redis {
    /// Namespace prefix for every key
    pub const KEY_PREFIX: &str = "expiry:";
    /// Connection timeout in seconds
    pub const CONNECTION_TIMEOUT_SECS: u64 = 5;
    /// Response timeout in seconds
    pub const RESPONSE_TIMEOUT_SECS: u64 = 3;
    /// Reconnection retries after a dropped connection
    pub const RECONNECTION_RETRIES: usize = 3;
    /// Exponential backoff base
    pub const RETRY_EXPONENT_BASE: u64 = 2;
    /// Maximum retry delay in milliseconds
    pub const MAX_RETRY_DELAY_MS: u64 = 5_000;
    /// Retries for the initial connection at startup
    pub const INITIAL_CONNECTION_RETRIES: u32 = 3;
    /// First retry delay in milliseconds
    pub const INITIAL_RETRY_DELAY_MS: u64 = 500;
}
