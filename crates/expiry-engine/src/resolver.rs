// ABOUTME: Three-tier secret resolution: environment variable, embedded constant, stored setting
// ABOUTME: Reports which categories are externally configured and detects their removal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use chrono::{DateTime, Utc};
use expiry_core::constants::{embedded, secret_env};
use expiry_core::models::{ExternalConfigSnapshot, ExternalSource, ExternalStatus, Settings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Group of secrets that are enabled and edited together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigCategory {
    /// Bot token + chat id
    Telegram,
    /// Dashboard password
    Auth,
}

impl ConfigCategory {
    /// Keys belonging to this category; all must be present for it to count as external
    #[must_use]
    pub const fn keys(self) -> &'static [ConfigKey] {
        match self {
            Self::Telegram => &[ConfigKey::BotToken, ConfigKey::ChatId],
            Self::Auth => &[ConfigKey::Password],
        }
    }
}

/// A single resolvable secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigKey {
    /// `telegram.botToken`
    BotToken,
    /// `telegram.chatId`
    ChatId,
    /// `auth.password`
    Password,
}

impl ConfigKey {
    /// Category this key belongs to
    #[must_use]
    pub const fn category(self) -> ConfigCategory {
        match self {
            Self::BotToken | Self::ChatId => ConfigCategory::Telegram,
            Self::Password => ConfigCategory::Auth,
        }
    }

    /// Environment variable that overrides this key
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::BotToken => secret_env::TG_TOKEN,
            Self::ChatId => secret_env::TG_ID,
            Self::Password => secret_env::PASS,
        }
    }

    /// Value held in the stored settings blob
    #[must_use]
    pub fn stored(self, settings: &Settings) -> &str {
        match self {
            Self::BotToken => &settings.telegram.bot_token,
            Self::ChatId => &settings.telegram.chat_id,
            Self::Password => &settings.auth.password,
        }
    }
}

/// Source of environment variables
pub trait EnvLookup: Send + Sync {
    /// Value of `name`, if set
    fn var(&self, name: &str) -> Option<String>;
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Credentials compiled into the binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedSecrets {
    /// Embedded bot token
    pub bot_token: String,
    /// Embedded chat id
    pub chat_id: String,
    /// Embedded password
    pub password: String,
}

impl EmbeddedSecrets {
    /// Constants from `expiry_core::constants::embedded`
    #[must_use]
    pub fn compiled() -> Self {
        Self {
            bot_token: embedded::TG_TOKEN.to_owned(),
            chat_id: embedded::TG_ID.to_owned(),
            password: embedded::PASS.to_owned(),
        }
    }

    fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::BotToken => &self.bot_token,
            ConfigKey::ChatId => &self.chat_id,
            ConfigKey::Password => &self.password,
        }
    }
}

/// Resolves effective secrets over environment, embedded constants, and stored settings
pub struct ConfigResolver<'a> {
    env: &'a dyn EnvLookup,
    embedded: &'a EmbeddedSecrets,
}

impl<'a> ConfigResolver<'a> {
    /// Create a resolver over the two external tiers
    #[must_use]
    pub fn new(env: &'a dyn EnvLookup, embedded: &'a EmbeddedSecrets) -> Self {
        Self { env, embedded }
    }

    /// External value of a key and where it came from; blank values count as absent
    #[must_use]
    pub fn external_value(&self, key: ConfigKey) -> Option<(String, ExternalSource)> {
        if let Some(value) = self.env.var(key.env_var()).filter(|v| !v.trim().is_empty()) {
            return Some((value, ExternalSource::Environment));
        }
        let embedded = self.embedded.get(key);
        if embedded.trim().is_empty() {
            None
        } else {
            Some((embedded.to_owned(), ExternalSource::Code))
        }
    }

    /// Effective value: environment, then embedded constant, then `stored`
    #[must_use]
    pub fn resolve(&self, key: ConfigKey, stored: &str) -> String {
        self.external_value(key)
            .map_or_else(|| stored.to_owned(), |(value, _)| value)
    }

    /// Effective value with the stored tier read from `settings`
    #[must_use]
    pub fn resolve_from(&self, key: ConfigKey, settings: &Settings) -> String {
        self.resolve(key, key.stored(settings))
    }

    /// Whether every key of `category` is supplied externally
    ///
    /// The source is `environment` when any of the keys came from the
    /// environment, otherwise `code`.
    #[must_use]
    pub fn has_external(&self, category: ConfigCategory) -> ExternalStatus {
        let mut source = ExternalSource::Code;
        for key in category.keys() {
            match self.external_value(*key) {
                Some((_, ExternalSource::Environment)) => source = ExternalSource::Environment,
                Some(_) => {}
                None => return ExternalStatus::none(),
            }
        }
        ExternalStatus::from_source(source)
    }

    /// Current external state of both categories
    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> ExternalConfigSnapshot {
        ExternalConfigSnapshot {
            telegram: self.has_external(ConfigCategory::Telegram),
            auth: self.has_external(ConfigCategory::Auth),
            last_check: now,
        }
    }
}

/// External credentials force a feature on regardless of the stored flag
#[must_use]
pub const fn effective_enabled(external: &ExternalStatus, stored_enabled: bool) -> bool {
    external.has_external || stored_enabled
}

/// Categories that stopped being external between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRemoval {
    /// Telegram credentials were external and no longer are
    pub telegram_removed: bool,
    /// The password was external and no longer is
    pub auth_removed: bool,
}

impl ExternalRemoval {
    /// Whether any cleanup is needed
    #[must_use]
    pub const fn any(&self) -> bool {
        self.telegram_removed || self.auth_removed
    }
}

/// Compare the persisted snapshot with the current one
///
/// Without a previous snapshot nothing is reported, so the first check after a
/// deployment never cleans anything up.
#[must_use]
pub const fn detect_external_config_removal(
    previous: Option<&ExternalConfigSnapshot>,
    current: &ExternalConfigSnapshot,
) -> ExternalRemoval {
    match previous {
        Some(previous) => ExternalRemoval {
            telegram_removed: previous.telegram.has_external && !current.telegram.has_external,
            auth_removed: previous.auth.has_external && !current.auth.has_external,
        },
        None => ExternalRemoval {
            telegram_removed: false,
            auth_removed: false,
        },
    }
}
