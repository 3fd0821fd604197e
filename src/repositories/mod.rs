// ABOUTME: Repository traits giving typed access to each stored collection
// ABOUTME: Every collection is one JSON blob read and written as a whole
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Repository layer
//!
//! Each repository loads a whole collection, lets the caller mutate it, and
//! writes the whole collection back. Two concurrent writers to the same
//! collection race and the later write wins. Swapping in per-record storage
//! only requires new implementations of these traits.

/// Category collection
pub mod category_repository;
/// External config snapshot
pub mod external_state_repository;
/// Server collection
pub mod server_repository;
/// Settings singleton
pub mod settings_repository;

pub use category_repository::CategoryRepositoryImpl;
pub use external_state_repository::ExternalStateRepositoryImpl;
pub use server_repository::ServerRepositoryImpl;
pub use settings_repository::SettingsRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{Category, ExternalConfigSnapshot, Server, Settings};
use async_trait::async_trait;

/// Server records
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// All servers in stored order; empty when nothing was written yet
    async fn list(&self) -> AppResult<Vec<Server>>;

    /// Overwrite the whole collection
    async fn save_all(&self, servers: &[Server]) -> AppResult<()>;
}

/// Category records
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories in stored order; empty when nothing was written yet
    async fn list(&self) -> AppResult<Vec<Category>>;

    /// Overwrite the whole collection
    async fn save_all(&self, categories: &[Category]) -> AppResult<()>;
}

/// The settings singleton
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored settings, or defaults when none were saved
    async fn load(&self) -> AppResult<Settings>;

    /// Overwrite the settings blob
    async fn save(&self, settings: &Settings) -> AppResult<()>;
}

/// Last persisted external config snapshot
#[async_trait]
pub trait ExternalStateRepository: Send + Sync {
    /// Previous snapshot, if any check has run
    async fn load(&self) -> AppResult<Option<ExternalConfigSnapshot>>;

    /// Persist the latest snapshot
    async fn save(&self, snapshot: &ExternalConfigSnapshot) -> AppResult<()>;
}
