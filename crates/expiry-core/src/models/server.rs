// ABOUTME: Server record tracked for renewal and expiry
// ABOUTME: Includes emoji-insensitive name normalisation used for uniqueness checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use serde::{Deserialize, Deserializer, Serialize};

/// How the last renewal was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalType {
    /// Expiry pushed forward by one renewal period
    Auto,
    /// Expiry set to an explicit date by the operator
    Manual,
}

/// A VPS or server whose expiry is tracked
///
/// Dates are kept as the strings the dashboard submits (`YYYY-MM-DD`); they are
/// parsed at use sites so a malformed stored value degrades to "no date"
/// instead of failing the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Time-derived identifier assigned on creation
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Display name, unique after normalisation
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Address shown on the dashboard
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: String,
    /// Hosting provider
    #[serde(default, deserialize_with = "lenient_string")]
    pub provider: String,
    /// Owning category; empty for the default bucket
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_id: String,
    /// Date the server was registered
    #[serde(default)]
    pub register_date: String,
    /// Renewal period such as `1月` or `1年`
    #[serde(default)]
    pub renewal_period: String,
    /// Renewal period before a manual renewal replaced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_renewal_period: Option<String>,
    /// Expiry date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
    /// Date of the last renewal action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_renewal_date: Option<String>,
    /// Kind of the last renewal action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_renewal_type: Option<RenewalType>,
    /// Free-form price label
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
    /// Provider page used to renew
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub renewal_link: Option<String>,
    /// Free-form tag text
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<String>,
    /// Tag badge color
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag_color: Option<String>,
    /// Per-server notification lead time; falls back to the global setting
    #[serde(
        default,
        deserialize_with = "lenient_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub notify_days: Option<u32>,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: String,
}

/// Accept `7`, `"7"`, `""` and `null` for day counts written by older dashboards
///
/// # Errors
///
/// Only fails when the input is not valid JSON at all
pub fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(notify_days_from_value))
}

/// Accept text fields that older dashboards stored as numbers or booleans
///
/// # Errors
///
/// Only fails when the input is not valid JSON at all
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

/// Like [`lenient_text`] for fields that are always present; `null` becomes empty
///
/// # Errors
///
/// Only fails when the input is not valid JSON at all
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn text_from_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Interpret a JSON number or numeric string as a day count
#[must_use]
pub fn notify_days_from_value(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strip emoji and whitespace from a server name for uniqueness comparison
///
/// `"🚀 Prod"` and `"Prod"` normalise to the same value. The comparison that
/// follows is case-sensitive.
#[must_use]
pub fn normalize_server_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !is_emoji_component(*c))
        .collect()
}

const fn is_emoji_component(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF // pictographs, emoticons, transport, flags, symbols
            | 0x2600..=0x27BF // misc symbols and dingbats
            | 0x2300..=0x23FF // misc technical (⌚, ⏰)
            | 0x2B00..=0x2BFF // arrows and stars (⭐)
            | 0xFE00..=0xFE0F // variation selectors
            | 0x200D // zero width joiner
            | 0x20E3 // combining keycap
            | 0xE0020..=0xE007F // tag sequences
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_emoji_and_whitespace() {
        assert_eq!(normalize_server_name("🚀Prod"), "Prod");
        assert_eq!(normalize_server_name(" 🇺🇸 US West 1 "), "USWest1");
        assert_eq!(normalize_server_name("👨‍💻dev"), "dev");
        assert_eq!(normalize_server_name("🔥 ⭐"), "");
    }

    #[test]
    fn test_normalize_keeps_cjk() {
        assert_eq!(normalize_server_name("东京 节点"), "东京节点");
    }

    #[test]
    fn test_notify_days_accepts_strings() {
        let server: Server = serde_json::from_str(
            r#"{"id":"1","name":"a","notifyDays":"7","registerDate":"2024-01-01","renewalPeriod":"1月"}"#,
        )
        .unwrap_or_else(|e| panic!("deserialize: {e}"));
        assert_eq!(server.notify_days, Some(7));

        let server: Server = serde_json::from_str(r#"{"id":"1","name":"a","notifyDays":""}"#)
            .unwrap_or_else(|e| panic!("deserialize: {e}"));
        assert_eq!(server.notify_days, None);
    }

    #[test]
    fn test_legacy_field_types_are_tolerated() {
        let server: Server = serde_json::from_str(
            r#"{"id":1700000000000,"name":"Prod","price":5,"tags":null,"ip":null,"categoryId":3}"#,
        )
        .unwrap_or_else(|e| panic!("deserialize: {e}"));
        assert_eq!(server.id, "1700000000000");
        assert_eq!(server.price.as_deref(), Some("5"));
        assert_eq!(server.tags, None);
        assert_eq!(server.ip, "");
        assert_eq!(server.category_id, "3");

        let server: Server = serde_json::from_str(r#"{"registerDate":"2024-01-01"}"#)
            .unwrap_or_else(|e| panic!("deserialize: {e}"));
        assert!(server.id.is_empty());
        assert!(server.name.is_empty());
    }
}
