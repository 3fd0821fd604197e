// ABOUTME: Renewal period arithmetic, expiry classification, and secret precedence resolution
// ABOUTME: Pure functions shared by request handlers and the scheduled notification sweep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

#![deny(unsafe_code)]

//! # Expiry Engine
//!
//! The two pieces of the dashboard with real decision logic:
//!
//! - **Renewal periods**: parse `N天` / `N月` / `N年`, convert to cycle days,
//!   add periods to dates with month-end clamping, and infer a period back from
//!   two dates.
//! - **Expiry status**: days remaining until expiry and the
//!   expired / warning / normal classification against the half-cycle threshold.
//! - **Config resolution**: environment variable > embedded constant > stored
//!   setting, plus external-config detection and removal tracking.
//!
//! Nothing here touches the network or the store, and nothing here fails on
//! malformed input: bad periods fall back to documented defaults and bad dates
//! are treated as absent.

/// Calendar-aware date arithmetic
pub mod calendar;
/// Renewal period tokenizer and day conversion
pub mod period;
/// Three-tier secret resolution
pub mod resolver;
/// Days-remaining and status classification
pub mod status;

pub use calendar::{add_period, infer_period, parse_date};
pub use period::{period_days, RenewalPeriod, Unit};
pub use resolver::{
    detect_external_config_removal, effective_enabled, ConfigCategory, ConfigKey, ConfigResolver,
    EmbeddedSecrets, EnvLookup, ExternalRemoval,
};
pub use status::{
    classify, classify_optional, days_remaining, days_remaining_str, evaluate, ExpiryInfo,
    ExpiryStatus,
};
