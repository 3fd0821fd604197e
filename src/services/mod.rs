// ABOUTME: Domain service layer holding the business rules behind each route
// ABOUTME: Validation, derived fields, and read-modify-write over the repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Domain service layer
//!
//! Route handlers stay thin and delegate here; the scheduler reuses the same
//! services so scheduled and manual sweeps behave identically.

/// Session login and token verification
pub mod auth;
/// Category CRUD and reordering
pub mod categories;
/// External config snapshot tracking and cleanup
pub mod external_config;
/// Expiry sweep and Telegram delivery
pub mod notifications;
/// Server CRUD, derived status, and renewal
pub mod servers;
/// Settings validation, masking, and editability
pub mod settings;

pub use auth::{AuthService, AuthStatus, IssuedToken};
pub use categories::{CategoryInput, CategoryService};
pub use external_config::{ExternalCheck, ExternalConfigMonitor};
pub use notifications::{NotificationService, SweepReport};
pub use servers::{RenewRequest, ServerInput, ServerService, ServerUpdate, ServerView};
pub use settings::{SettingsService, SettingsView};

use chrono::{DateTime, Utc};

/// Time-derived record id, bumped by one millisecond until unused
pub(crate) fn generate_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// Trimmed value, or `None` when blank
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_id_skips_taken() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).single();
        let Some(now) = now else {
            panic!("valid timestamp");
        };
        let id = generate_id(now, |c| c == "1700000000000" || c == "1700000000001");
        assert_eq!(id, "1700000000002");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".to_owned())), Some("x".to_owned()));
        assert_eq!(non_blank(Some("   ".to_owned())), None);
        assert_eq!(non_blank(None), None);
    }
}
