// ABOUTME: Category record used to group servers on the dashboard
// ABOUTME: Servers with an empty category id fall into the default bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use serde::{Deserialize, Serialize};

/// A named group of servers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Display position; lower sorts first
    #[serde(default)]
    pub sort_order: i64,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: String,
}

impl Category {
    /// Id of the implicit default bucket
    pub const DEFAULT_BUCKET: &'static str = "";
}
