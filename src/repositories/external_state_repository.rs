// ABOUTME: External config snapshot repository over the key-value store
// ABOUTME: Reads and writes the `external_config_state` cache key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::ExternalStateRepository;
use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::models::ExternalConfigSnapshot;
use crate::storage::Store;
use async_trait::async_trait;

/// Key-value implementation of `ExternalStateRepository`
#[derive(Clone)]
pub struct ExternalStateRepositoryImpl {
    store: Store,
}

impl ExternalStateRepositoryImpl {
    /// Create a new repository over `store`
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ExternalStateRepository for ExternalStateRepositoryImpl {
    async fn load(&self) -> AppResult<Option<ExternalConfigSnapshot>> {
        self.store
            .get_json(storage_keys::EXTERNAL_CONFIG_STATE)
            .await
    }

    async fn save(&self, snapshot: &ExternalConfigSnapshot) -> AppResult<()> {
        self.store
            .put_json(storage_keys::EXTERNAL_CONFIG_STATE, snapshot)
            .await
    }
}
