// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a recording notifier, fixed clocks, secret maps, and resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `expiry_dashboard`

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use expiry_dashboard::config::environment::ServerConfig;
use expiry_dashboard::config::SecretSources;
use expiry_dashboard::errors::{AppError, AppResult};
use expiry_dashboard::notifications::{Notifier, TelegramTarget};
use expiry_dashboard::resources::ServerResources;
use expiry_dashboard::storage::Store;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// Midnight UTC on the given date
pub fn at_midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Secret sources backed by a fixed map instead of the process environment
pub fn secrets(vars: &[(&str, &str)]) -> SecretSources {
    SecretSources::from_map(
        vars.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>(),
    )
}

/// Notifier that records every message and fails for texts containing a marker
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(TelegramTarget, String)>>,
    fail_when: Option<String>,
}

impl RecordingNotifier {
    pub fn failing_when(marker: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_when: Some(marker.to_owned()),
        }
    }

    pub fn sent(&self) -> Vec<(TelegramTarget, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, target: &TelegramTarget, text: &str) -> AppResult<()> {
        if let Some(marker) = &self.fail_when {
            if text.contains(marker.as_str()) {
                return Err(AppError::external_service("Telegram", "Bad Request: chat not found"));
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), text.to_owned()));
        Ok(())
    }
}

/// Resources over an optional store with fixed secrets and a recording notifier
pub fn test_resources(
    store: Option<Store>,
    secrets: SecretSources,
    notifier: Arc<RecordingNotifier>,
) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(
        Arc::new(ServerConfig::default()),
        store,
        secrets,
        notifier,
    ))
}
