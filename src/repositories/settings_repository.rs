// ABOUTME: Settings repository implementation over the key-value store
// ABOUTME: Missing settings read as defaults so first boot needs no seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::SettingsRepository;
use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::models::Settings;
use crate::storage::Store;
use async_trait::async_trait;

/// Key-value implementation of `SettingsRepository`
#[derive(Clone)]
pub struct SettingsRepositoryImpl {
    store: Store,
}

impl SettingsRepositoryImpl {
    /// Create a new repository over `store`
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryImpl {
    async fn load(&self) -> AppResult<Settings> {
        Ok(self
            .store
            .get_json(storage_keys::SETTINGS)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> AppResult<()> {
        self.store.put_json(storage_keys::SETTINGS, settings).await
    }
}
