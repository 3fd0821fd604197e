// ABOUTME: Snapshot of which credential categories are supplied outside stored settings
// ABOUTME: Persisted so a removed environment credential can trigger a one-shot cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an external credential comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalSource {
    /// Platform environment variable
    Environment,
    /// Constant compiled into the binary
    Code,
    /// Not external; the stored setting applies
    #[default]
    None,
}

impl fmt::Display for ExternalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::Code => write!(f, "code"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Whether one category is externally configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalStatus {
    /// True when the category's credentials come from environment or code
    pub has_external: bool,
    /// Origin of the credentials
    pub source: ExternalSource,
}

impl ExternalStatus {
    /// Status of a category configured only through stored settings
    #[must_use]
    pub const fn none() -> Self {
        Self {
            has_external: false,
            source: ExternalSource::None,
        }
    }

    /// Status of a category configured from the given source
    #[must_use]
    pub const fn from_source(source: ExternalSource) -> Self {
        Self {
            has_external: true,
            source,
        }
    }
}

/// Persisted view of external configuration at the last check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalConfigSnapshot {
    /// Telegram bot token + chat id
    pub telegram: ExternalStatus,
    /// Dashboard password
    pub auth: ExternalStatus,
    /// When the snapshot was taken
    pub last_check: DateTime<Utc>,
}
