// ABOUTME: Expiry sweep selecting due servers and sending one Telegram message per category
// ABOUTME: A failed send is logged and the sweep carries on with the remaining groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::settings::SettingsService;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Category, Server, Settings};
use crate::notifications::{test_message, ExpiryMessage, MessageLine, Notifier};
use crate::repositories::{
    CategoryRepository, CategoryRepositoryImpl, ServerRepository, ServerRepositoryImpl,
};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use expiry_engine::days_remaining_str;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Group label for servers without a (known) category
pub const DEFAULT_GROUP_NAME: &str = "Uncategorized";

/// Summary of one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Nothing was sent because notifications are off or incomplete
    pub skipped: bool,
    /// Why the sweep was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Servers examined
    pub checked: usize,
    /// Servers expired or within their reminder window
    pub due: usize,
    /// Messages delivered
    pub groups_sent: usize,
    /// Messages that failed
    pub groups_failed: usize,
    /// Servers covered by delivered messages
    pub servers_notified: usize,
}

impl SweepReport {
    fn skipped(reason: &str) -> Self {
        Self {
            skipped: true,
            reason: Some(reason.to_owned()),
            ..Self::default()
        }
    }
}

/// A server selected for a reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueServer {
    /// The server
    pub server: Server,
    /// Days until expiry; negative once expired
    pub days_remaining: i64,
}

/// Servers with a usable expiry date that are expired or inside their reminder window
///
/// The window is the server's own `notifyDays`, else the global setting.
#[must_use]
pub fn due_servers(servers: &[Server], settings: &Settings, as_of: DateTime<Utc>) -> Vec<DueServer> {
    servers
        .iter()
        .filter_map(|server| {
            let days = days_remaining_str(server.expire_date.as_deref()?, as_of)?;
            let window = i64::from(server.notify_days.unwrap_or(settings.global_notify_days));
            (days < 0 || days <= window).then(|| DueServer {
                server: server.clone(),
                days_remaining: days,
            })
        })
        .collect()
}

/// Group due servers by category in display order, default bucket last
#[must_use]
pub fn group_by_category(due: Vec<DueServer>, categories: &[Category]) -> Vec<ExpiryMessage> {
    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by_key(|c| c.sort_order);

    let mut groups: Vec<(Option<&Category>, Vec<DueServer>)> =
        ordered.iter().map(|c| (Some(*c), Vec::new())).collect();
    groups.push((None, Vec::new()));

    for item in due {
        let index = ordered
            .iter()
            .position(|c| c.id == item.server.category_id)
            .unwrap_or(ordered.len());
        groups[index].1.push(item);
    }

    groups
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(category, mut items)| {
            items.sort_by_key(|i| i.days_remaining);
            ExpiryMessage {
                group_name: category.map_or_else(|| DEFAULT_GROUP_NAME.to_owned(), |c| c.name.clone()),
                lines: items
                    .into_iter()
                    .map(|i| MessageLine {
                        name: i.server.name,
                        provider: i.server.provider,
                        expire_date: i.server.expire_date.unwrap_or_default(),
                        days_remaining: i.days_remaining,
                        renewal_link: i.server.renewal_link,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Runs expiry sweeps and test messages
#[derive(Clone)]
pub struct NotificationService {
    servers: ServerRepositoryImpl,
    categories: CategoryRepositoryImpl,
    settings: SettingsService,
    notifier: Arc<dyn Notifier>,
}

impl NotificationService {
    /// Create a service over `store` delivering through `notifier`
    #[must_use]
    pub fn new(store: Store, settings: SettingsService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            servers: ServerRepositoryImpl::new(store.clone()),
            categories: CategoryRepositoryImpl::new(store),
            settings,
            notifier,
        }
    }

    /// Scan all servers and send one reminder per category group
    ///
    /// # Errors
    ///
    /// Returns an error only if a store read fails; delivery failures are
    /// counted in the report
    pub async fn check_and_notify(&self, now: DateTime<Utc>) -> AppResult<SweepReport> {
        let settings = self.settings.get().await?;
        let Some(target) = self.settings.telegram_target(&settings) else {
            info!("Telegram notifications disabled or incomplete; skipping expiry sweep");
            return Ok(SweepReport::skipped("Telegram notifications are not configured"));
        };

        let servers = self.servers.list().await?;
        let due = due_servers(&servers, &settings, now);
        let mut report = SweepReport {
            checked: servers.len(),
            due: due.len(),
            ..SweepReport::default()
        };
        if due.is_empty() {
            info!(checked = report.checked, "No servers due for a reminder");
            return Ok(report);
        }

        let categories = self.categories.list().await?;
        for message in group_by_category(due, &categories) {
            let text = message.render(&settings.site_title);
            match self.notifier.send(&target, &text).await {
                Ok(()) => {
                    AppLogger::log_notification("telegram", &message.group_name, true);
                    report.groups_sent += 1;
                    report.servers_notified += message.lines.len();
                }
                Err(e) => {
                    AppLogger::log_notification("telegram", &message.group_name, false);
                    warn!(group = %message.group_name, error = %e, "Expiry reminder not delivered");
                    report.groups_failed += 1;
                }
            }
        }

        info!(
            checked = report.checked,
            due = report.due,
            sent = report.groups_sent,
            failed = report.groups_failed,
            "Expiry sweep finished"
        );
        Ok(report)
    }

    /// Send a single test message with the effective Telegram settings
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when Telegram is not configured, or the delivery error
    pub async fn send_test(&self, now: DateTime<Utc>) -> AppResult<()> {
        let settings = self.settings.get().await?;
        let target = self.settings.telegram_target(&settings).ok_or_else(|| {
            AppError::invalid_input("Telegram notifications are not enabled or incomplete")
        })?;
        self.notifier
            .send(&target, &test_message(&settings.site_title, now))
            .await
    }
}
