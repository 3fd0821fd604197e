// ABOUTME: Re-exports the unified error types from the core crate
// ABOUTME: Keeps `crate::errors::AppError` paths stable inside the service crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

pub use expiry_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails};
