// ABOUTME: Storage keys, secret variable names, and default values shared across crates
// ABOUTME: Embedded credential constants form the code tier of the secret precedence chain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

/// Keys of the JSON blobs held in the key-value store
pub mod storage_keys {
    /// Full server collection
    pub const SERVERS: &str = "servers";
    /// Full category collection
    pub const CATEGORIES: &str = "categories";
    /// Singleton settings record
    pub const SETTINGS: &str = "settings";
    /// Last observed external-config snapshot
    pub const EXTERNAL_CONFIG_STATE: &str = "external_config_state";
}

/// Environment variables that carry secrets
pub mod secret_env {
    /// Dashboard login password
    pub const PASS: &str = "PASS";
    /// Telegram bot token
    pub const TG_TOKEN: &str = "TG_TOKEN";
    /// Telegram chat id
    pub const TG_ID: &str = "TG_ID";
}

/// Credentials compiled into the binary.
///
/// Deployments that cannot set environment variables fill these in before
/// building. They take precedence over stored settings but not over the
/// environment.
pub mod embedded {
    /// Embedded dashboard password
    pub const PASS: &str = "";
    /// Embedded Telegram bot token
    pub const TG_TOKEN: &str = "";
    /// Embedded Telegram chat id
    pub const TG_ID: &str = "";
}

/// Default values
pub mod defaults {
    /// Cycle length used when a renewal period cannot be parsed into days
    pub const DEFAULT_CYCLE_DAYS: u32 = 365;
    /// Days before expiry at which notifications start, unless a server overrides it
    pub const DEFAULT_GLOBAL_NOTIFY_DAYS: u32 = 14;
    /// Site title shown before the operator customizes it
    pub const DEFAULT_SITE_TITLE: &str = "Server Expiry Dashboard";
    /// Milliseconds per day used by the days-remaining computation
    pub const MILLIS_PER_DAY: i64 = 86_400_000;
}
