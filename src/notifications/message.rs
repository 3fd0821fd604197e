// ABOUTME: HTML message formatting for expiry reminders and test messages
// ABOUTME: All user-supplied text is escaped for Telegram's HTML parse mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// One server line in a reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    /// Server display name
    pub name: String,
    /// Hosting provider
    pub provider: String,
    /// Expiry date as stored
    pub expire_date: String,
    /// Days until expiry; negative once expired
    pub days_remaining: i64,
    /// Renewal page
    pub renewal_link: Option<String>,
}

impl MessageLine {
    fn render(&self) -> String {
        let marker = if self.days_remaining < 0 { "🔴" } else { "🟡" };
        let mut out = format!("{marker} <b>{}</b>", encode_text(&self.name));
        if !self.provider.trim().is_empty() {
            out.push_str(&format!(" ({})", encode_text(&self.provider)));
        }
        let expire_date = encode_text(&self.expire_date);
        out.push_str(&match self.days_remaining {
            d if d < 0 => format!(
                "\n    Expired {} day(s) ago, on {expire_date}",
                d.unsigned_abs()
            ),
            0 => format!("\n    Expires today ({expire_date})"),
            d => format!("\n    Expires in {d} day(s), on {expire_date}"),
        });
        if let Some(link) = self.renewal_link.as_deref().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!(
                "\n    <a href=\"{}\">Renew</a>",
                encode_double_quoted_attribute(link)
            ));
        }
        out
    }
}

/// Reminder for one category group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryMessage {
    /// Category name, or the default bucket label
    pub group_name: String,
    /// Servers due in this group
    pub lines: Vec<MessageLine>,
}

impl ExpiryMessage {
    /// Render as Telegram HTML
    #[must_use]
    pub fn render(&self, site_title: &str) -> String {
        let mut out = format!(
            "⏰ <b>{}</b>\nCategory: <b>{}</b> ({} server(s))\n\n",
            encode_text(site_title),
            encode_text(&self.group_name),
            self.lines.len()
        );
        for line in &self.lines {
            out.push_str(&line.render());
            out.push('\n');
        }
        out.trim_end().to_owned()
    }
}

/// Body of the settings-page test message
#[must_use]
pub fn test_message(site_title: &str, now: DateTime<Utc>) -> String {
    format!(
        "✅ <b>{}</b>\nTelegram notifications are configured correctly.\nSent at {}",
        encode_text(site_title),
        now.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
