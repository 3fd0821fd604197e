// ABOUTME: Integration tests for renewal period arithmetic and expiry classification
// ABOUTME: Covers period parsing fallbacks, month-end clamping, period inference, and status thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{at_midnight, date};
use expiry_engine::{
    add_period, classify, days_remaining, evaluate, infer_period, parse_date, period_days,
    ExpiryStatus, RenewalPeriod, Unit,
};

#[test]
fn test_period_days_flat_multipliers() {
    assert_eq!(period_days("1年"), 365);
    assert_eq!(period_days("1月"), 30);
    assert_eq!(period_days("6个月"), 180);
    assert_eq!(period_days("15天"), 15);
}

#[test]
fn test_period_days_is_monotonic() {
    let ordered = ["1天", "7天", "1月", "3月", "6个月", "1年", "2年"];
    let days: Vec<u32> = ordered.iter().map(|p| period_days(p)).collect();
    assert!(
        days.windows(2).all(|w| w[0] < w[1]),
        "cycle days should grow with the period: {days:?}"
    );
}

#[test]
fn test_parse_fallbacks_differ_between_forms_and_cycles() {
    assert_eq!(
        RenewalPeriod::parse_or_default(""),
        RenewalPeriod::new(1, Unit::Month)
    );
    assert_eq!(
        RenewalPeriod::parse_or_default("every so often"),
        RenewalPeriod::FORM_DEFAULT
    );
    assert_eq!(period_days("garbage"), 365);
    assert_eq!(period_days(""), 365);
    assert!("0年".parse::<RenewalPeriod>().is_err());
}

#[test]
fn test_classify_thresholds() {
    assert_eq!(classify(-1, 100), ExpiryStatus::Expired);
    assert_eq!(classify(-1, 3650), ExpiryStatus::Expired);
    assert_eq!(classify(0, 100), ExpiryStatus::Warning);
    assert_eq!(classify(50, 100), ExpiryStatus::Warning);
    assert_eq!(classify(51, 100), ExpiryStatus::Normal);

    // odd cycles round the half down
    assert_eq!(classify(182, 365), ExpiryStatus::Warning);
    assert_eq!(classify(183, 365), ExpiryStatus::Normal);
}

#[test]
fn test_add_period_clamps_month_end() {
    let one_month = RenewalPeriod::new(1, Unit::Month);
    let one_year = RenewalPeriod::new(1, Unit::Year);

    assert_eq!(add_period(date(2024, 1, 31), one_month), Some(date(2024, 2, 29)));
    assert_eq!(add_period(date(2023, 1, 31), one_month), Some(date(2023, 2, 28)));
    assert_eq!(add_period(date(2024, 2, 29), one_year), Some(date(2025, 2, 28)));
    assert_eq!(
        add_period(date(2024, 3, 15), RenewalPeriod::new(30, Unit::Day)),
        Some(date(2024, 4, 14))
    );
    assert_eq!(
        add_period(date(2024, 11, 30), RenewalPeriod::new(3, Unit::Month)),
        Some(date(2025, 2, 28))
    );
}

#[test]
fn test_infer_period_prefers_years_then_months_then_days() {
    assert_eq!(
        infer_period(date(2023, 6, 1), date(2024, 6, 1)),
        Some(RenewalPeriod::new(1, Unit::Year))
    );
    assert_eq!(
        infer_period(date(2024, 1, 15), date(2024, 4, 15)),
        Some(RenewalPeriod::new(3, Unit::Month))
    );
    assert_eq!(
        infer_period(date(2024, 11, 10), date(2025, 2, 10)),
        Some(RenewalPeriod::new(3, Unit::Month))
    );
    assert_eq!(
        infer_period(date(2024, 1, 1), date(2024, 1, 16)),
        Some(RenewalPeriod::new(15, Unit::Day))
    );

    let start = date(2024, 1, 10);
    assert_eq!(infer_period(start, date(2025, 1, 10)).map(|p| p.to_string()).as_deref(), Some("1年"));
    assert_eq!(infer_period(start, date(2024, 4, 10)).map(|p| p.to_string()).as_deref(), Some("3月"));
    assert_eq!(infer_period(start, date(2024, 1, 25)).map(|p| p.to_string()).as_deref(), Some("15天"));
}

#[test]
fn test_register_plus_period_round_trips_through_inference() {
    let register = date(2024, 1, 10);
    for text in ["1年", "3月", "15天", "2年"] {
        let period = RenewalPeriod::parse(text).unwrap();
        let expire = add_period(register, period).unwrap();
        assert_eq!(infer_period(register, expire), Some(period), "{text}");
    }
}

#[test]
fn test_infer_period_tolerates_clamped_month_end() {
    // Feb-28 + 1 year from a leap-day start differs by one day
    assert_eq!(
        infer_period(date(2024, 2, 29), date(2025, 2, 28)),
        Some(RenewalPeriod::new(1, Unit::Year))
    );
}

#[test]
fn test_infer_period_requires_later_date() {
    assert_eq!(infer_period(date(2024, 5, 1), date(2024, 5, 1)), None);
    assert_eq!(infer_period(date(2024, 5, 1), date(2024, 4, 1)), None);
}

#[test]
fn test_days_remaining_rounds_up() {
    let expire = date(2024, 3, 10);

    assert_eq!(days_remaining(expire, at_midnight(2024, 3, 1)), 9);
    assert_eq!(
        days_remaining(expire, at_midnight(2024, 3, 1) + Duration::hours(12)),
        9
    );
    assert_eq!(days_remaining(expire, at_midnight(2024, 3, 10)), 0);
    assert_eq!(
        days_remaining(expire, at_midnight(2024, 3, 10) + Duration::hours(6)),
        0
    );
    assert_eq!(
        days_remaining(expire, at_midnight(2024, 3, 11) + Duration::hours(6)),
        -1
    );
}

#[test]
fn test_evaluate_without_usable_date_is_normal() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();

    let missing = evaluate(None, "1月", now);
    assert_eq!(missing.status, ExpiryStatus::Normal);
    assert_eq!(missing.days_remaining, None);
    assert_eq!(missing.cycle_days, 30);

    let malformed = evaluate(Some("next tuesday"), "1月", now);
    assert_eq!(malformed.status, ExpiryStatus::Normal);
    assert_eq!(malformed.days_remaining, None);
}

#[test]
fn test_evaluate_uses_cycle_of_the_period() {
    let now = at_midnight(2024, 6, 1);

    let monthly = evaluate(Some("2024-06-16"), "1月", now);
    assert_eq!(monthly.days_remaining, Some(15));
    assert_eq!(monthly.status, ExpiryStatus::Warning);

    let yearly = evaluate(Some("2024-06-16"), "1年", now);
    assert_eq!(yearly.status, ExpiryStatus::Warning);

    let far = evaluate(Some("2025-01-01"), "1年", now);
    assert_eq!(far.status, ExpiryStatus::Normal);

    let past = evaluate(Some("2024-05-31"), "1年", now);
    assert_eq!(past.status, ExpiryStatus::Expired);
    assert_eq!(past.days_remaining, Some(-1));
}

#[test]
fn test_parse_date_accepts_timestamps() {
    assert_eq!(parse_date("2024-06-16"), Some(date(2024, 6, 16)));
    assert_eq!(parse_date("2024-06-16T10:00:00Z"), Some(date(2024, 6, 16)));
    assert_eq!(parse_date("16/06/2024"), None);
    assert_eq!(parse_date(""), None);
}
