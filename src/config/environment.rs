// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, storage backend selection, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Environment-based configuration management for production deployment

use crate::constants::{ports, redis, scheduler, session, telegram};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational
    #[default]
    Info,
    /// Debugging
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Key-value backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map; data is lost on restart
    #[default]
    Memory,
    /// Shared Redis instance
    Redis,
    /// No store bound; data routes report `STORAGE_UNAVAILABLE`
    None,
}

impl StorageBackend {
    /// Parse from string with fallback to memory
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "redis" => Self::Redis,
            "none" | "unbound" | "disabled" => Self::None,
            _ => Self::Memory,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Redis => write!(f, "redis"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Redis connection and retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConnectionConfig {
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// Response/command timeout in seconds
    pub response_timeout_secs: u64,
    /// Number of reconnection retries after connection drop
    pub reconnection_retries: usize,
    /// Exponential backoff base for retry delays
    pub retry_exponent_base: u64,
    /// Maximum retry delay in milliseconds
    pub max_retry_delay_ms: u64,
    /// Number of retries for initial connection at startup
    pub initial_connection_retries: u32,
    /// Initial retry delay in milliseconds (doubles with exponential backoff)
    pub initial_retry_delay_ms: u64,
}

impl Default for RedisConnectionConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: redis::CONNECTION_TIMEOUT_SECS,
            response_timeout_secs: redis::RESPONSE_TIMEOUT_SECS,
            reconnection_retries: redis::RECONNECTION_RETRIES,
            retry_exponent_base: redis::RETRY_EXPONENT_BASE,
            max_retry_delay_ms: redis::MAX_RETRY_DELAY_MS,
            initial_connection_retries: redis::INITIAL_CONNECTION_RETRIES,
            initial_retry_delay_ms: redis::INITIAL_RETRY_DELAY_MS,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
    /// Redis URL, required for the Redis backend
    pub redis_url: Option<String>,
    /// Redis connection tuning
    pub redis_connection: RedisConnectionConfig,
}

/// Notification delivery and scheduling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Telegram Bot API base URL
    pub telegram_api_base: String,
    /// Seconds between scheduled sweeps
    pub check_interval_secs: u64,
    /// Run the periodic sweep at all
    pub scheduler_enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            telegram_api_base: telegram::DEFAULT_API_BASE.to_owned(),
            check_interval_secs: scheduler::DEFAULT_CHECK_INTERVAL_SECS,
            scheduler_enabled: false,
        }
    }
}

/// Session token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token lifetime in hours
    pub ttl_hours: u64,
    /// Salt mixed into the token hash
    pub token_salt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: session::DEFAULT_SESSION_TTL_HOURS,
            token_salt: session::DEFAULT_TOKEN_SALT.to_owned(),
        }
    }
}

/// Cross-origin access for a separately hosted front-end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*` / empty for any
    pub allowed_origins: String,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Key-value storage
    pub storage: StorageConfig,
    /// Notification delivery and scheduling
    pub notifications: NotificationConfig,
    /// Session tokens
    pub session: SessionConfig,
    /// CORS
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::Testing,
            log_level: LogLevel::Info,
            storage: StorageConfig::default(),
            notifications: NotificationConfig::default(),
            session: SessionConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed or
    /// validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            storage: StorageConfig {
                backend: StorageBackend::from_str_or_default(&env_var_or(
                    "STORAGE_BACKEND",
                    "memory",
                )),
                redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
                redis_connection: RedisConnectionConfig {
                    connection_timeout_secs: env_var_or(
                        "REDIS_CONNECTION_TIMEOUT_SECS",
                        &redis::CONNECTION_TIMEOUT_SECS.to_string(),
                    )
                    .parse()
                    .context("Invalid REDIS_CONNECTION_TIMEOUT_SECS value")?,
                    initial_connection_retries: env_var_or(
                        "REDIS_INITIAL_CONNECTION_RETRIES",
                        &redis::INITIAL_CONNECTION_RETRIES.to_string(),
                    )
                    .parse()
                    .context("Invalid REDIS_INITIAL_CONNECTION_RETRIES value")?,
                    ..RedisConnectionConfig::default()
                },
            },
            notifications: NotificationConfig {
                telegram_api_base: env_var_or("TELEGRAM_API_BASE", telegram::DEFAULT_API_BASE)
                    .trim_end_matches('/')
                    .to_owned(),
                check_interval_secs: env_var_or(
                    "CHECK_INTERVAL_SECS",
                    &scheduler::DEFAULT_CHECK_INTERVAL_SECS.to_string(),
                )
                .parse()
                .context("Invalid CHECK_INTERVAL_SECS value")?,
                scheduler_enabled: env_var_or("SCHEDULER_ENABLED", "true")
                    .parse()
                    .context("Invalid SCHEDULER_ENABLED value")?,
            },
            session: SessionConfig {
                ttl_hours: env_var_or(
                    "SESSION_TTL_HOURS",
                    &session::DEFAULT_SESSION_TTL_HOURS.to_string(),
                )
                .parse()
                .context("Invalid SESSION_TTL_HOURS value")?,
                token_salt: env_var_or("SESSION_TOKEN_SALT", session::DEFAULT_TOKEN_SALT),
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", ""),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when the Redis backend has no URL or the sweep interval is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::Redis && self.storage.redis_url.is_none() {
            return Err(anyhow::anyhow!(
                "STORAGE_BACKEND=redis requires REDIS_URL to be set"
            ));
        }

        if self.notifications.check_interval_secs == 0 {
            return Err(anyhow::anyhow!("CHECK_INTERVAL_SECS must be greater than zero"));
        }

        if self.storage.backend == StorageBackend::None {
            warn!("No key-value store bound; data routes will report STORAGE_UNAVAILABLE");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Expiry Dashboard Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Storage Backend: {}\n\
             - Scheduler: {} (every {}s)\n\
             - Telegram API: {}",
            self.http_port,
            self.environment,
            self.log_level,
            self.storage.backend,
            if self.notifications.scheduler_enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.notifications.check_interval_secs,
            self.notifications.telegram_api_base,
        )
    }
}

/// Read an environment variable, falling back to `default` when unset
fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}
