// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains the shared HTTP client used for outbound notification calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

/// HTTP client configuration and helpers
pub mod http_client;
