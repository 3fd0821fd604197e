// ABOUTME: Domain records persisted as JSON blobs in the key-value store
// ABOUTME: Server, category, settings, and external config snapshot definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

/// Category records and ordering
pub mod category;
/// External credential snapshot
pub mod external;
/// Server records and name normalisation
pub mod server;
/// Singleton settings record
pub mod settings;

pub use category::Category;
pub use external::{ExternalConfigSnapshot, ExternalSource, ExternalStatus};
pub use server::{normalize_server_name, RenewalType, Server};
pub use settings::{AuthSettings, Settings, TelegramSettings};
