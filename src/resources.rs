// ABOUTME: Shared server resources handed to every route and the scheduler
// ABOUTME: Holds configuration, the optional store, secret sources, and the notifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::config::environment::ServerConfig;
use crate::config::SecretSources;
use crate::errors::{AppError, AppResult};
use crate::notifications::{Notifier, TelegramNotifier};
use crate::services::{
    AuthService, CategoryService, ExternalConfigMonitor, NotificationService, ServerService,
    SettingsService,
};
use crate::storage::Store;
use std::sync::Arc;

/// Everything a request handler needs, shared behind an `Arc`
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Key-value store; `None` when no backend is bound
    pub store: Option<Store>,
    /// Environment and compiled-in secret tiers
    pub secrets: SecretSources,
    /// Outbound message delivery
    pub notifier: Arc<dyn Notifier>,
}

impl ServerResources {
    /// Assemble resources from their parts
    #[must_use]
    pub fn new(
        config: Arc<ServerConfig>,
        store: Option<Store>,
        secrets: SecretSources,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            secrets,
            notifier,
        }
    }

    /// Production wiring: process environment secrets and the Telegram notifier
    #[must_use]
    pub fn with_defaults(config: Arc<ServerConfig>, store: Option<Store>) -> Self {
        let notifier = Arc::new(TelegramNotifier::new(
            config.notifications.telegram_api_base.clone(),
        ));
        Self::new(config, store, SecretSources::from_process(), notifier)
    }

    /// The bound store
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when no store is bound
    pub fn store(&self) -> AppResult<Store> {
        self.store.clone().ok_or_else(AppError::storage_unavailable)
    }

    /// Server operations
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when no store is bound
    pub fn server_service(&self) -> AppResult<ServerService> {
        Ok(ServerService::new(self.store()?))
    }

    /// Category operations
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when no store is bound
    pub fn category_service(&self) -> AppResult<CategoryService> {
        Ok(CategoryService::new(self.store()?))
    }

    /// Settings operations
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when no store is bound
    pub fn settings_service(&self) -> AppResult<SettingsService> {
        Ok(SettingsService::new(self.store()?, self.secrets.clone()))
    }

    /// External config tracking
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when no store is bound
    pub fn external_monitor(&self) -> AppResult<ExternalConfigMonitor> {
        Ok(ExternalConfigMonitor::new(self.store()?, self.secrets.clone()))
    }

    /// Expiry sweeps and test messages
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when no store is bound
    pub fn notification_service(&self) -> AppResult<NotificationService> {
        Ok(NotificationService::new(
            self.store()?,
            self.settings_service()?,
            Arc::clone(&self.notifier),
        ))
    }

    /// Login and token checks; works without a store using external passwords only
    #[must_use]
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.store.clone(),
            self.secrets.clone(),
            self.config.session.clone(),
        )
    }
}
