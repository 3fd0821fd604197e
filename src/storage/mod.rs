// ABOUTME: Key-value storage abstraction holding whole-collection JSON blobs
// ABOUTME: Pluggable backend support (in-memory, Redis) selected from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

/// Store factory and typed JSON helpers
pub mod factory;
/// In-memory store implementation
pub mod memory;
/// Redis store implementation
pub mod redis;

pub use self::factory::Store;
pub use self::memory::InMemoryKv;
pub use self::redis::RedisKv;

use crate::errors::AppResult;

/// Key-value store holding one JSON text blob per logical collection
///
/// Values are opaque strings; serialization happens in [`Store`]. There is no
/// compare-and-swap, so concurrent read-modify-write cycles are last-write-wins.
///
/// # Examples
///
/// ```rust,no_run
/// use expiry_dashboard::storage::{InMemoryKv, KvStore};
/// # async fn example() -> Result<(), expiry_dashboard::errors::AppError> {
/// let kv = InMemoryKv::new();
/// kv.put("servers", "[]".to_owned()).await?;
/// assert_eq!(kv.get("servers").await?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached
    async fn put(&self, key: &str, value: String) -> AppResult<()>;

    /// Verify the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
