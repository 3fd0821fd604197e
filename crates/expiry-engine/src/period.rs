// ABOUTME: Renewal period tokenizer producing a closed unit enum and flat day conversion
// ABOUTME: Keeps the form default (one month) and the day-count default (365 days) separate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use expiry_core::constants::defaults::DEFAULT_CYCLE_DAYS;
use expiry_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Renewal period unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// `天`
    Day,
    /// `月` or `个月`
    Month,
    /// `年`
    Year,
}

impl Unit {
    /// Flat day multiplier; months are 30 days and years 365
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Month => 30,
            Self::Year => 365,
        }
    }

    /// Canonical suffix used when rendering a period
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Day => "天",
            Self::Month => "月",
            Self::Year => "年",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "天" => Some(Self::Day),
            "月" | "个月" => Some(Self::Month),
            "年" => Some(Self::Year),
            _ => None,
        }
    }
}

/// A renewal period such as three months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenewalPeriod {
    /// Number of units, always at least one
    pub count: u32,
    /// Unit of the period
    pub unit: Unit,
}

impl RenewalPeriod {
    /// Period assumed by forms when the stored text cannot be parsed
    pub const FORM_DEFAULT: Self = Self {
        count: 1,
        unit: Unit::Month,
    };

    /// Create a period
    #[must_use]
    pub const fn new(count: u32, unit: Unit) -> Self {
        Self { count, unit }
    }

    /// Parse `<digits><unit>`, e.g. `3月`, `1 年`, `6个月`, `30天`
    ///
    /// Returns `None` for empty text, a missing or zero count, an unknown unit,
    /// or trailing characters after the unit.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits_end = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        if digits_end == 0 {
            return None;
        }

        let count: u32 = text[..digits_end].parse().ok()?;
        if count == 0 {
            return None;
        }

        let unit = Unit::from_token(text[digits_end..].trim_start())?;
        Some(Self { count, unit })
    }

    /// Parse for form prefill; unparseable text becomes one month
    #[must_use]
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::FORM_DEFAULT)
    }

    /// Cycle length in days with flat multipliers
    #[must_use]
    pub const fn to_days(self) -> u32 {
        self.count.saturating_mul(self.unit.days())
    }
}

impl fmt::Display for RenewalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for RenewalPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            AppError::invalid_format(format!(
                "Invalid renewal period '{s}': expected a number followed by 天, 月 or 年"
            ))
        })
    }
}

/// Cycle length in days for a stored period string
///
/// Unparseable or empty text counts as a 365-day cycle. This differs from
/// [`RenewalPeriod::parse_or_default`] on purpose: status colours and forms
/// have always used different fallbacks.
#[must_use]
pub fn period_days(text: &str) -> u32 {
    RenewalPeriod::parse(text).map_or(DEFAULT_CYCLE_DAYS, RenewalPeriod::to_days)
}
