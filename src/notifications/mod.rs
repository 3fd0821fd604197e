// ABOUTME: Outbound notification delivery for expiry warnings
// ABOUTME: Defines the Notifier seam and the Telegram Bot API implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Notification delivery
//!
//! The sweep only needs to know whether a send succeeded. A failure carries
//! the API's error description so it can be logged.

/// HTML message formatting for expiry reminders
pub mod message;
/// Telegram Bot API client
pub mod telegram;

pub use message::{test_message, ExpiryMessage, MessageLine};
pub use telegram::TelegramNotifier;

use crate::errors::AppResult;
use async_trait::async_trait;

/// Where a message goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramTarget {
    /// Bot token issued by `@BotFather`
    pub bot_token: String,
    /// Destination chat id
    pub chat_id: String,
}

impl TelegramTarget {
    /// Both credentials are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

/// Sends one HTML-formatted message
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `target`
    ///
    /// # Errors
    ///
    /// Returns an error when the API is unreachable or rejects the message
    async fn send(&self, target: &TelegramTarget, text: &str) -> AppResult<()>;
}
