// ABOUTME: Server repository implementation over the key-value store
// ABOUTME: Reads and writes the `servers` blob
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::ServerRepository;
use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::models::Server;
use crate::storage::Store;
use async_trait::async_trait;

/// Key-value implementation of `ServerRepository`
#[derive(Clone)]
pub struct ServerRepositoryImpl {
    store: Store,
}

impl ServerRepositoryImpl {
    /// Create a new repository over `store`
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ServerRepository for ServerRepositoryImpl {
    async fn list(&self) -> AppResult<Vec<Server>> {
        Ok(self
            .store
            .get_json(storage_keys::SERVERS)
            .await?
            .unwrap_or_default())
    }

    async fn save_all(&self, servers: &[Server]) -> AppResult<()> {
        self.store.put_json(storage_keys::SERVERS, &servers).await
    }
}
