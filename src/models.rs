// ABOUTME: Re-exports domain records from the core crate
// ABOUTME: Servers, categories, settings, and external config snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

pub use expiry_core::models::{
    normalize_server_name, AuthSettings, Category, ExternalConfigSnapshot, ExternalSource,
    ExternalStatus, RenewalType, Server, Settings, TelegramSettings,
};
