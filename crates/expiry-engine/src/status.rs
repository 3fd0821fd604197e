// ABOUTME: Days-remaining computation and expired / warning / normal classification
// ABOUTME: Status is recomputed on every read; there is no stored state or hysteresis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::calendar::parse_date;
use crate::period::period_days;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use expiry_core::constants::defaults::MILLIS_PER_DAY;
use serde::{Deserialize, Serialize};

/// Display status of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    /// Past its expiry date
    Expired,
    /// Within half a renewal cycle of expiry
    Warning,
    /// Neither expired nor close to expiry, or no expiry date
    Normal,
}

/// Whole days from `as_of` until midnight UTC at the start of `expire`, rounded up
///
/// Negative once the expiry date has passed.
#[must_use]
pub fn days_remaining(expire: NaiveDate, as_of: DateTime<Utc>) -> i64 {
    let expire_at = Utc.from_utc_datetime(&expire.and_time(NaiveTime::default()));
    let millis = (expire_at - as_of).num_milliseconds();

    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Days remaining for a stored date string; malformed dates give `None`
#[must_use]
pub fn days_remaining_str(expire: &str, as_of: DateTime<Utc>) -> Option<i64> {
    parse_date(expire).map(|date| days_remaining(date, as_of))
}

/// Classify remaining days against a renewal cycle
///
/// Expired below zero; warning at or below `floor(cycle_days / 2)`; normal above.
#[must_use]
pub const fn classify(days_remaining: i64, cycle_days: u32) -> ExpiryStatus {
    if days_remaining < 0 {
        return ExpiryStatus::Expired;
    }
    let half_cycle = (cycle_days / 2) as i64;
    if days_remaining <= half_cycle {
        ExpiryStatus::Warning
    } else {
        ExpiryStatus::Normal
    }
}

/// Classify a possibly-missing day count; no date is always normal
#[must_use]
pub const fn classify_optional(days_remaining: Option<i64>, cycle_days: u32) -> ExpiryStatus {
    match days_remaining {
        Some(days) => classify(days, cycle_days),
        None => ExpiryStatus::Normal,
    }
}

/// Derived expiry view of one server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryInfo {
    /// Days until expiry; `None` when there is no usable expiry date
    pub days_remaining: Option<i64>,
    /// Renewal cycle length in days
    pub cycle_days: u32,
    /// Resulting status
    pub status: ExpiryStatus,
}

/// Evaluate stored expiry date and renewal period strings
///
/// A missing or malformed expiry date yields `Normal` with no day count.
#[must_use]
pub fn evaluate(expire_date: Option<&str>, renewal_period: &str, as_of: DateTime<Utc>) -> ExpiryInfo {
    let cycle_days = period_days(renewal_period);
    let days_remaining = expire_date.and_then(|date| days_remaining_str(date, as_of));
    let status = classify_optional(days_remaining, cycle_days);

    ExpiryInfo {
        days_remaining,
        cycle_days,
        status,
    }
}
