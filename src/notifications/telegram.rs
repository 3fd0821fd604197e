// ABOUTME: Telegram Bot API notifier posting HTML messages via sendMessage
// ABOUTME: Uses the shared reqwest client and surfaces the API error description on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::{Notifier, TelegramTarget};
use crate::constants::telegram::{PARSE_MODE, SERVICE_NAME};
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::shared_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramNotifier {
    api_base: String,
    client: Client,
}

impl TelegramNotifier {
    /// Create a notifier against `api_base` (e.g. `https://api.telegram.org`)
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            client: shared_client().clone(),
        }
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, target: &TelegramTarget, text: &str) -> AppResult<()> {
        let body = SendMessageRequest {
            chat_id: &target.chat_id,
            text,
            parse_mode: PARSE_MODE,
        };

        let response = self
            .client
            .post(self.send_message_url(&target.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors embed the URL, which carries the bot token
                error!("Telegram request failed: {}", e.without_url());
                AppError::external_unavailable(SERVICE_NAME, "Telegram API is unreachable")
            })?;

        let status = response.status();
        let parsed: Option<ApiResponse> = response.json().await.ok();

        if status.is_success() && parsed.as_ref().is_none_or(|r| r.ok) {
            debug!(chat_id = %target.chat_id, "Telegram message sent");
            return Ok(());
        }

        let description = parsed
            .and_then(|r| r.description)
            .unwrap_or_else(|| format!("HTTP {status}"));
        Err(AppError::external_service(SERVICE_NAME, description))
    }
}
