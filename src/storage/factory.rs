// ABOUTME: Store factory for configuration-based backend selection
// ABOUTME: Wraps the chosen backend with typed JSON get/put helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::{memory::InMemoryKv, redis::RedisKv, KvStore};
use crate::config::environment::{StorageBackend, StorageConfig};
use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Unified store handle shared by every repository
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn KvStore>,
}

impl Store {
    /// Wrap an existing backend
    #[must_use]
    pub fn new(inner: Arc<dyn KvStore>) -> Self {
        Self { inner }
    }

    /// Fresh in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKv::new()))
    }

    /// Build the configured backend; `Ok(None)` when no store is bound
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis backend has no URL or cannot connect
    pub async fn from_config(config: &StorageConfig) -> AppResult<Option<Self>> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Initializing in-memory key-value store");
                Ok(Some(Self::in_memory()))
            }
            StorageBackend::Redis => {
                let url = config.redis_url.as_deref().ok_or_else(|| {
                    AppError::config("Redis URL is required for the Redis storage backend")
                })?;
                let kv = RedisKv::connect(url, &config.redis_connection).await?;
                Ok(Some(Self::new(Arc::new(kv))))
            }
            StorageBackend::None => {
                warn!("Key-value store not bound");
                Ok(None)
            }
        }
    }

    /// Read and deserialize the blob under `key`
    ///
    /// A missing key yields `None`. A blob that does not match the record shape
    /// is an error, so read-modify-write callers never overwrite it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the blob cannot be decoded
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.inner.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            warn!(key, error = %e, "Stored blob does not match its collection shape");
            AppError::storage(format!("Stored `{key}` data could not be decoded"))
                .with_details(serde_json::json!({ "key": key, "reason": e.to_string() }))
                .with_source(e)
        })
    }

    /// Serialize `value` and overwrite the blob under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails
    pub async fn put_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.inner.put(key, raw).await
    }

    /// Raw access to the backend
    #[must_use]
    pub fn kv(&self) -> &dyn KvStore {
        self.inner.as_ref()
    }

    /// Verify the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    pub async fn health_check(&self) -> AppResult<()> {
        self.inner.health_check().await
    }

    /// Backend name for logs and health output
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}
