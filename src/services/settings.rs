// ABOUTME: Settings service with typed get/save over the singleton blob
// ABOUTME: Validates credential combinations, masks secrets, and locks externally supplied values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::config::SecretSources;
use crate::errors::{AppError, AppResult};
use crate::models::{ExternalStatus, Settings};
use crate::notifications::TelegramTarget;
use crate::repositories::{SettingsRepository, SettingsRepositoryImpl};
use crate::storage::Store;
use expiry_engine::{effective_enabled, ConfigCategory, ConfigKey};
use serde::Serialize;
use tracing::info;

const PASSWORD_MASK: &str = "********";

/// Which categories are supplied outside the stored settings and therefore read-only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEditability {
    /// Telegram credentials
    pub telegram: ExternalStatus,
    /// Login password
    pub auth: ExternalStatus,
}

/// Whether each feature is on after applying external credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveFlags {
    /// Telegram notifications
    pub telegram_enabled: bool,
    /// Login required
    pub auth_enabled: bool,
}

/// Settings as shown to the settings page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    /// Stored settings with secrets masked
    pub settings: Settings,
    /// Read-only categories
    pub external: ExternalEditability,
    /// Effective feature flags
    pub effective: EffectiveFlags,
}

/// Settings operations over the singleton blob
#[derive(Clone)]
pub struct SettingsService {
    settings: SettingsRepositoryImpl,
    secrets: SecretSources,
}

impl SettingsService {
    /// Create a service over `store`
    #[must_use]
    pub const fn new(store: Store, secrets: SecretSources) -> Self {
        Self {
            settings: SettingsRepositoryImpl::new(store),
            secrets,
        }
    }

    /// Stored settings, defaults when none were saved
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn get(&self) -> AppResult<Settings> {
        self.settings.load().await
    }

    /// Masked settings plus editability
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn view(&self) -> AppResult<SettingsView> {
        let stored = self.settings.load().await?;
        Ok(self.build_view(&stored))
    }

    /// Validate and overwrite the settings wholesale
    ///
    /// Credentials of an externally supplied category cannot be edited: the
    /// stored values are kept whatever was submitted. A submitted secret equal
    /// to its masked form also keeps the stored value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when Telegram is effectively enabled without both
    /// effective credentials, or login is effectively enabled without an
    /// effective password
    pub async fn save(&self, mut submitted: Settings) -> AppResult<SettingsView> {
        let current = self.settings.load().await?;
        let resolver = self.secrets.resolver();
        let external = self.external();

        if external.telegram.has_external {
            submitted.telegram.bot_token.clone_from(&current.telegram.bot_token);
            submitted.telegram.chat_id.clone_from(&current.telegram.chat_id);
        } else {
            keep_if_masked(&mut submitted.telegram.bot_token, &current.telegram.bot_token);
        }
        if external.auth.has_external {
            submitted.auth.password.clone_from(&current.auth.password);
        } else if submitted.auth.password == PASSWORD_MASK {
            submitted.auth.password.clone_from(&current.auth.password);
        }

        submitted.telegram.bot_token = submitted.telegram.bot_token.trim().to_owned();
        submitted.telegram.chat_id = submitted.telegram.chat_id.trim().to_owned();

        if effective_enabled(&external.telegram, submitted.telegram.enabled) {
            let token = resolver.resolve_from(ConfigKey::BotToken, &submitted);
            let chat_id = resolver.resolve_from(ConfigKey::ChatId, &submitted);
            if token.trim().is_empty() || chat_id.trim().is_empty() {
                return Err(AppError::invalid_input(
                    "Telegram notifications require both a bot token and a chat id",
                ));
            }
        }
        if effective_enabled(&external.auth, submitted.auth.enabled)
            && resolver
                .resolve_from(ConfigKey::Password, &submitted)
                .is_empty()
        {
            return Err(AppError::invalid_input(
                "Login protection requires a password",
            ));
        }

        self.settings.save(&submitted).await?;
        info!(
            telegram_enabled = submitted.telegram.enabled,
            auth_enabled = submitted.auth.enabled,
            global_notify_days = submitted.global_notify_days,
            "Settings saved"
        );
        Ok(self.build_view(&submitted))
    }

    /// Current external status of both categories
    #[must_use]
    pub fn external(&self) -> ExternalEditability {
        let resolver = self.secrets.resolver();
        ExternalEditability {
            telegram: resolver.has_external(ConfigCategory::Telegram),
            auth: resolver.has_external(ConfigCategory::Auth),
        }
    }

    /// Effective Telegram destination, `None` when notifications are off or incomplete
    #[must_use]
    pub fn telegram_target(&self, settings: &Settings) -> Option<TelegramTarget> {
        let resolver = self.secrets.resolver();
        let external = resolver.has_external(ConfigCategory::Telegram);
        if !effective_enabled(&external, settings.telegram.enabled) {
            return None;
        }
        let target = TelegramTarget {
            bot_token: resolver.resolve_from(ConfigKey::BotToken, settings),
            chat_id: resolver.resolve_from(ConfigKey::ChatId, settings),
        };
        target.is_complete().then_some(target)
    }

    fn build_view(&self, stored: &Settings) -> SettingsView {
        let external = self.external();
        let mut masked = stored.clone();
        masked.telegram.bot_token = mask_secret(&stored.telegram.bot_token);
        if !stored.auth.password.is_empty() {
            masked.auth.password = PASSWORD_MASK.to_owned();
        }

        SettingsView {
            settings: masked,
            external,
            effective: EffectiveFlags {
                telegram_enabled: effective_enabled(&external.telegram, stored.telegram.enabled),
                auth_enabled: effective_enabled(&external.auth, stored.auth.enabled),
            },
        }
    }
}

/// Hide all but the last four characters of a secret
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return String::new();
    }
    if count <= 4 {
        return "****".to_owned();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{tail}")
}

fn keep_if_masked(submitted: &mut String, current: &str) {
    if !current.is_empty() && *submitted == mask_secret(current) {
        current.clone_into(submitted);
    }
}
