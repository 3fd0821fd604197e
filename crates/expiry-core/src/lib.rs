// ABOUTME: Core types and constants for the server expiry dashboard
// ABOUTME: Foundation crate with error handling, domain records, and storage constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

#![deny(unsafe_code)]

//! # Expiry Core
//!
//! Foundation crate providing shared types and constants for the server expiry
//! dashboard. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Storage keys, environment variable names, and defaults
//! - **models**: Server, category, settings, and external config records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Domain records persisted in the key-value store
pub mod models;
