// ABOUTME: Calendar-aware renewal date arithmetic and period inference between two dates
// ABOUTME: Month and year additions clamp to the last day of the target month
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::period::{RenewalPeriod, Unit};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate};

/// Parse a stored date: `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Add a renewal period to a date
///
/// Month and year additions keep the day of month when it exists and otherwise
/// land on the month's last day: Jan-31 + 1 month is Feb-29 in 2024 and Feb-28
/// in 2023, Feb-29 + 1 year is Feb-28. Returns `None` only when the result falls
/// outside the supported calendar range.
#[must_use]
pub fn add_period(date: NaiveDate, period: RenewalPeriod) -> Option<NaiveDate> {
    match period.unit {
        Unit::Day => date.checked_add_days(Days::new(u64::from(period.count))),
        Unit::Month => date.checked_add_months(Months::new(period.count)),
        Unit::Year => date.checked_add_months(Months::new(period.count.checked_mul(12)?)),
    }
}

/// Infer the most natural renewal period taking `from` to `to`
///
/// Whole years win when month and day line up (one day of slack for month-end
/// clamping), then whole months, otherwise the raw day difference. Returns
/// `None` unless `to` is after `from`.
#[must_use]
pub fn infer_period(from: NaiveDate, to: NaiveDate) -> Option<RenewalPeriod> {
    if to <= from {
        return None;
    }

    let year_diff = to.year() - from.year();
    let month_diff = to.month() as i32 - from.month() as i32;
    let day_aligned = (to.day() as i32 - from.day() as i32).abs() <= 1;

    if year_diff > 0 && month_diff == 0 && day_aligned {
        return Some(RenewalPeriod::new(year_diff as u32, Unit::Year));
    }
    if year_diff == 0 && month_diff > 0 && day_aligned {
        return Some(RenewalPeriod::new(month_diff as u32, Unit::Month));
    }

    let total_months = year_diff * 12 + month_diff;
    if total_months > 0 && day_aligned {
        return Some(RenewalPeriod::new(total_months as u32, Unit::Month));
    }

    let days = (to - from).num_days();
    u32::try_from(days)
        .ok()
        .map(|days| RenewalPeriod::new(days, Unit::Day))
}
