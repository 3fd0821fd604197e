// ABOUTME: Configuration management module for server settings and secret sources
// ABOUTME: Loads deployment settings from the environment and exposes the process env to the resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Configuration module
//!
//! - **Environment**: server configuration from environment variables
//! - **Secrets**: process-environment lookup feeding the secret resolver

/// Environment and server configuration
pub mod environment;
/// Process environment access for secret resolution
pub mod secrets;

pub use environment::ServerConfig;
pub use secrets::{ProcessEnv, SecretSources};
