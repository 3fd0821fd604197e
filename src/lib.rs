// ABOUTME: Main library entry point for the server expiry dashboard
// ABOUTME: Wires storage, repositories, services, notifications, and HTTP routes together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

#![deny(unsafe_code)]

//! # Expiry Dashboard
//!
//! Tracks VPS/server records, groups them into categories, computes
//! time-to-expiry status, and sends expiry warnings through Telegram.
//!
//! ## Architecture
//!
//! - **Engine** (`expiry-engine` crate): renewal period arithmetic, status
//!   classification, and the environment > code > stored secret resolver
//! - **Storage**: a key-value store holding whole-collection JSON blobs
//! - **Repositories**: typed read-all / write-all access to each collection
//! - **Services**: validation and business rules on top of the repositories
//! - **Notifications**: Telegram delivery and the scheduled expiry sweep
//! - **Routes**: the axum JSON API consumed by the dashboard front-end
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use expiry_dashboard::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Expiry dashboard configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management from the environment
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling (re-exported from `expiry-core`)
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for session authentication
pub mod middleware;

/// Domain records (re-exported from `expiry-core`)
pub mod models;

/// Outbound notification delivery
pub mod notifications;

/// Typed access to the stored collections
pub mod repositories;

/// Shared server resources handed to every route
pub mod resources;

/// `HTTP` routes for the dashboard API
pub mod routes;

/// Periodic expiry sweep
pub mod scheduler;

/// Business rules for servers, categories, settings, auth, and notifications
pub mod services;

/// Key-value storage abstraction with pluggable backends
pub mod storage;

/// Utility functions and helpers
pub mod utils;
