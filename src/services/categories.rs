// ABOUTME: Category business logic: CRUD, display ordering, and default-bucket rehoming
// ABOUTME: Deleting a category moves its servers to the default bucket instead of deleting them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::generate_id;
use crate::errors::{AppError, AppResult};
use crate::models::Category;
use crate::repositories::{
    CategoryRepository, CategoryRepositoryImpl, ServerRepository, ServerRepositoryImpl,
};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when adding or updating a category
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Category operations over the `categories` collection
#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepositoryImpl,
    servers: ServerRepositoryImpl,
}

impl CategoryService {
    /// Create a service over `store`
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            categories: CategoryRepositoryImpl::new(store.clone()),
            servers: ServerRepositoryImpl::new(store),
        }
    }

    /// Categories in display order
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let mut categories = self.categories.list().await?;
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    /// Add a category at the end of the display order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name
    pub async fn add(&self, input: CategoryInput) -> AppResult<Category> {
        self.add_at(input, Utc::now()).await
    }

    /// Add a category with an explicit creation time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name
    pub async fn add_at(&self, input: CategoryInput, now: DateTime<Utc>) -> AppResult<Category> {
        let name = validate_name(&input.name)?;
        let mut categories = self.categories.list().await?;

        let sort_order = categories
            .iter()
            .map(|c| c.sort_order)
            .max()
            .map_or(0, |max| max + 1);
        let id = generate_id(now, |candidate| categories.iter().any(|c| c.id == candidate));

        let category = Category {
            id,
            name,
            description: input.description.unwrap_or_default().trim().to_owned(),
            sort_order,
            created_at: now.to_rfc3339(),
        };
        categories.push(category.clone());
        self.categories.save_all(&categories).await?;

        info!(category_id = %category.id, sort_order, "Category added");
        Ok(category)
    }

    /// Rename a category or change its description
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for an empty name
    pub async fn update(&self, id: &str, input: CategoryInput) -> AppResult<Category> {
        let name = validate_name(&input.name)?;
        let mut categories = self.categories.list().await?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Category {id}")))?;

        category.name = name;
        if let Some(description) = input.description {
            category.description = description.trim().to_owned();
        }
        let updated = category.clone();
        self.categories.save_all(&categories).await?;

        info!(category_id = %id, "Category updated");
        Ok(updated)
    }

    /// Delete a category and move its servers to the default bucket
    ///
    /// Returns the number of servers moved.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn delete(&self, id: &str) -> AppResult<usize> {
        let mut categories = self.categories.list().await?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(AppError::not_found(format!("Category {id}")));
        }

        let mut servers = self.servers.list().await?;
        let mut moved = 0;
        for server in servers.iter_mut().filter(|s| s.category_id == id) {
            server.category_id = Category::DEFAULT_BUCKET.to_owned();
            moved += 1;
        }
        if moved > 0 {
            self.servers.save_all(&servers).await?;
        }
        self.categories.save_all(&categories).await?;

        info!(category_id = %id, servers_moved = moved, "Category deleted");
        Ok(moved)
    }

    /// Reassign `sortOrder` over the full set
    ///
    /// Ids in `ordered_ids` take positions `0..n` in the given order; unknown
    /// ids are ignored and categories not listed keep their relative order after
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or write fails
    pub async fn reorder(&self, ordered_ids: &[String]) -> AppResult<Vec<Category>> {
        let mut remaining = self.list().await?;
        let mut ordered = Vec::with_capacity(remaining.len());

        for id in ordered_ids {
            if let Some(index) = remaining.iter().position(|c| &c.id == id) {
                ordered.push(remaining.remove(index));
            }
        }
        ordered.append(&mut remaining);

        for (position, category) in ordered.iter_mut().enumerate() {
            category.sort_order = i64::try_from(position).unwrap_or(i64::MAX);
        }
        self.categories.save_all(&ordered).await?;

        info!(count = ordered.len(), "Categories reordered");
        Ok(ordered)
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_input("Category name cannot be empty"));
    }
    Ok(name.to_owned())
}
