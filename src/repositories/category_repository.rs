// ABOUTME: Category repository implementation over the key-value store
// ABOUTME: Reads and writes the `categories` blob
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::CategoryRepository;
use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::models::Category;
use crate::storage::Store;
use async_trait::async_trait;

/// Key-value implementation of `CategoryRepository`
#[derive(Clone)]
pub struct CategoryRepositoryImpl {
    store: Store,
}

impl CategoryRepositoryImpl {
    /// Create a new repository over `store`
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn list(&self) -> AppResult<Vec<Category>> {
        Ok(self
            .store
            .get_json(storage_keys::CATEGORIES)
            .await?
            .unwrap_or_default())
    }

    async fn save_all(&self, categories: &[Category]) -> AppResult<()> {
        self.store
            .put_json(storage_keys::CATEGORIES, &categories)
            .await
    }
}
