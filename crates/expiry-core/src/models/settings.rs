// ABOUTME: Singleton settings record holding notification, auth, and display options
// ABOUTME: Unknown fields are preserved so wholesale saves never drop data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::constants::defaults::{DEFAULT_GLOBAL_NOTIFY_DAYS, DEFAULT_SITE_TITLE};
use serde::{Deserialize, Serialize};

/// Telegram notification settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramSettings {
    /// Whether expiry notifications are sent
    #[serde(default)]
    pub enabled: bool,
    /// Bot token
    #[serde(default)]
    pub bot_token: String,
    /// Target chat id
    #[serde(default)]
    pub chat_id: String,
}

impl TelegramSettings {
    /// Disable and forget stored credentials
    pub fn clear(&mut self) {
        self.enabled = false;
        self.bot_token.clear();
        self.chat_id.clear();
    }
}

/// Dashboard login settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettings {
    /// Whether the dashboard requires login
    #[serde(default)]
    pub enabled: bool,
    /// Login password
    #[serde(default)]
    pub password: String,
}

impl AuthSettings {
    /// Disable and forget the stored password
    pub fn clear(&mut self) {
        self.enabled = false;
        self.password.clear();
    }
}

/// The settings blob, overwritten wholesale on save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Telegram notification settings
    #[serde(default)]
    pub telegram: TelegramSettings,
    /// Login settings
    #[serde(default)]
    pub auth: AuthSettings,
    /// Default notification lead time in days
    #[serde(default = "default_global_notify_days")]
    pub global_notify_days: u32,
    /// Dashboard title
    #[serde(default = "default_site_title")]
    pub site_title: String,
    /// Message shown on the landing page
    #[serde(default)]
    pub welcome_message: String,
    /// Presentation options this service does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const fn default_global_notify_days() -> u32 {
    DEFAULT_GLOBAL_NOTIFY_DAYS
}

fn default_site_title() -> String {
    DEFAULT_SITE_TITLE.to_owned()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            telegram: TelegramSettings::default(),
            auth: AuthSettings::default(),
            global_notify_days: DEFAULT_GLOBAL_NOTIFY_DAYS,
            site_title: default_site_title(),
            welcome_message: String::new(),
            extra: serde_json::Map::new(),
        }
    }
}
