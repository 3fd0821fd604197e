// ABOUTME: Tracks which credentials come from the environment or compiled constants
// ABOUTME: Clears orphaned stored settings once when an external credential disappears
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::config::SecretSources;
use crate::errors::AppResult;
use crate::models::ExternalConfigSnapshot;
use crate::repositories::{
    ExternalStateRepository, ExternalStateRepositoryImpl, SettingsRepository,
    SettingsRepositoryImpl,
};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use expiry_engine::{detect_external_config_removal, ExternalRemoval};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one external config check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCheck {
    /// Snapshot persisted by this check
    pub snapshot: ExternalConfigSnapshot,
    /// Categories whose stored settings were cleared
    pub removal: ExternalRemoval,
}

/// Compares the current external state with the last persisted snapshot
#[derive(Clone)]
pub struct ExternalConfigMonitor {
    state: ExternalStateRepositoryImpl,
    settings: SettingsRepositoryImpl,
    secrets: SecretSources,
}

impl ExternalConfigMonitor {
    /// Create a monitor over `store`
    #[must_use]
    pub fn new(store: Store, secrets: SecretSources) -> Self {
        Self {
            state: ExternalStateRepositoryImpl::new(store.clone()),
            settings: SettingsRepositoryImpl::new(store),
            secrets,
        }
    }

    /// Current snapshot without persisting anything
    #[must_use]
    pub fn current(&self, now: DateTime<Utc>) -> ExternalConfigSnapshot {
        self.secrets.resolver().snapshot(now)
    }

    /// Last persisted snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn last(&self) -> AppResult<Option<ExternalConfigSnapshot>> {
        self.state.load().await
    }

    /// Detect removed external credentials, clean up, and persist the new snapshot
    ///
    /// A category that was external in the previous snapshot and is not any
    /// more has its stored settings zeroed. The new snapshot is written every
    /// time, so a second check right after a cleanup finds nothing to do. With
    /// no previous snapshot nothing is cleaned.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read or write fails
    pub async fn check(&self, now: DateTime<Utc>) -> AppResult<ExternalCheck> {
        let previous = self.state.load().await?;
        let snapshot = self.current(now);
        let removal = detect_external_config_removal(previous.as_ref(), &snapshot);

        if removal.any() {
            let mut settings = self.settings.load().await?;
            if removal.telegram_removed {
                settings.telegram.clear();
                info!("External Telegram credentials removed; cleared stored Telegram settings");
            }
            if removal.auth_removed {
                settings.auth.clear();
                info!("External password removed; cleared stored login settings");
            }
            self.settings.save(&settings).await?;
        } else {
            debug!("External config unchanged");
        }

        self.state.save(&snapshot).await?;
        Ok(ExternalCheck { snapshot, removal })
    }
}
