// ABOUTME: Integration tests for the service layer over the in-memory key-value store
// ABOUTME: Covers server CRUD and renewal, categories, settings, external cleanup, auth, and the sweep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::Duration;
use common::{at_midnight, date, init_test_logging, secrets, RecordingNotifier};
use expiry_dashboard::config::environment::SessionConfig;
use expiry_dashboard::errors::ErrorCode;
use expiry_dashboard::models::{RenewalType, Settings};
use expiry_dashboard::repositories::{
    ServerRepository, ServerRepositoryImpl, SettingsRepository, SettingsRepositoryImpl,
};
use expiry_dashboard::services::{
    AuthService, CategoryInput, CategoryService, ExternalConfigMonitor, NotificationService,
    RenewRequest, ServerInput, ServerService, ServerUpdate, SettingsService,
};
use expiry_dashboard::storage::{KvStore, Store};
use expiry_engine::ExpiryStatus;
use std::sync::Arc;

fn server_input(name: &str, register: &str, period: &str) -> ServerInput {
    ServerInput {
        name: name.to_owned(),
        register_date: register.to_owned(),
        renewal_period: period.to_owned(),
        ..ServerInput::default()
    }
}

fn category_input(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_owned(),
        description: None,
    }
}

// ============================================================================
// Servers
// ============================================================================

#[tokio::test]
async fn test_add_derives_expiry_from_register_date() {
    init_test_logging();
    let service = ServerService::new(Store::in_memory());
    let now = at_midnight(2024, 2, 1);

    let server = service
        .add_at(server_input("Tokyo VPS", "2024-01-31", "1月"), now)
        .await
        .unwrap();
    assert_eq!(server.expire_date.as_deref(), Some("2024-02-29"));
    assert_eq!(server.renewal_period, "1月");
    assert_eq!(server.id, now.timestamp_millis().to_string());

    let canonical = service
        .add_at(server_input("Osaka VPS", "2024-01-01", "6个月"), now)
        .await
        .unwrap();
    assert_eq!(canonical.renewal_period, "6月");
    assert_ne!(canonical.id, server.id);
}

#[tokio::test]
async fn test_add_blank_period_uses_one_month() {
    let service = ServerService::new(Store::in_memory());
    let server = service
        .add_at(server_input("Edge", "2024-03-10", ""), at_midnight(2024, 3, 10))
        .await
        .unwrap();
    assert_eq!(server.renewal_period, "1月");
    assert_eq!(server.expire_date.as_deref(), Some("2024-04-10"));
}

#[tokio::test]
async fn test_duplicate_names_ignore_emoji_and_spaces() {
    let service = ServerService::new(Store::in_memory());
    let now = at_midnight(2024, 1, 1);
    service
        .add_at(server_input("Prod", "2024-01-01", "1年"), now)
        .await
        .unwrap();

    let err = service
        .add_at(server_input("🚀 Prod", "2024-01-01", "1年"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.http_status(), 409);

    let err = service
        .add_at(server_input("  🚀 ", "2024-01-01", "1年"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_add_validates_dates_and_periods() {
    let service = ServerService::new(Store::in_memory());
    let now = at_midnight(2024, 1, 1);

    let err = service
        .add_at(server_input("a", "", "1年"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let err = service
        .add_at(server_input("b", "01/02/2024", "1年"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);

    let err = service
        .add_at(server_input("c", "2024-01-01", "3 months"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);

    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_includes_derived_status() {
    let service = ServerService::new(Store::in_memory());
    let now = at_midnight(2024, 6, 1);

    let mut expiring = server_input("soon", "2023-06-10", "1年");
    expiring.expire_date = Some("2024-06-10".to_owned());
    service.add_at(expiring, now).await.unwrap();

    let mut lapsed = server_input("lapsed", "2023-05-01", "1月");
    lapsed.expire_date = Some("2024-05-01".to_owned());
    service.add_at(lapsed, now).await.unwrap();

    let views = service.list_at(now).await.unwrap();
    let soon = views.iter().find(|v| v.server.name == "soon").unwrap();
    assert_eq!(soon.expiry.days_remaining, Some(9));
    assert_eq!(soon.expiry.cycle_days, 365);
    assert_eq!(soon.expiry.status, ExpiryStatus::Warning);

    let lapsed = views.iter().find(|v| v.server.name == "lapsed").unwrap();
    assert_eq!(lapsed.expiry.status, ExpiryStatus::Expired);

    let json = serde_json::to_value(soon).unwrap();
    assert_eq!(json["daysRemaining"], 9);
    assert_eq!(json["status"], "warning");
    assert_eq!(json["name"], "soon");
}

#[tokio::test]
async fn test_update_recomputes_expiry_and_checks_names() {
    let service = ServerService::new(Store::in_memory());
    let now = at_midnight(2024, 1, 1);
    let first = service
        .add_at(server_input("alpha", "2024-01-15", "1月"), now)
        .await
        .unwrap();
    service
        .add_at(server_input("beta", "2024-01-01", "1月"), now)
        .await
        .unwrap();

    let updated = service
        .update(
            &first.id,
            ServerUpdate {
                renewal_period: Some("3月".to_owned()),
                notify_days: Some(serde_json::json!("7")),
                ..ServerUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.renewal_period, "3月");
    assert_eq!(updated.expire_date.as_deref(), Some("2024-04-15"));
    assert_eq!(updated.notify_days, Some(7));

    // renaming onto itself is fine
    service
        .update(
            &first.id,
            ServerUpdate {
                name: Some("alpha".to_owned()),
                ..ServerUpdate::default()
            },
        )
        .await
        .unwrap();

    let err = service
        .update(
            &first.id,
            ServerUpdate {
                name: Some("be ta".to_owned()),
                ..ServerUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = service
        .update("missing", ServerUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_server() {
    let service = ServerService::new(Store::in_memory());
    let server = service
        .add_at(server_input("gone", "2024-01-01", "1年"), at_midnight(2024, 1, 1))
        .await
        .unwrap();

    service.delete(&server.id).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());

    let err = service.delete(&server.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_auto_renew_adds_stored_period() {
    let service = ServerService::new(Store::in_memory());
    let mut input = server_input("renewable", "2023-12-15", "3月");
    input.expire_date = Some("2024-03-15".to_owned());
    let server = service
        .add_at(input, at_midnight(2024, 3, 1))
        .await
        .unwrap();

    let renewed = service
        .renew_on(
            &server.id,
            RenewRequest {
                renewal_type: RenewalType::Auto,
                new_expire_date: None,
            },
            date(2024, 3, 10),
        )
        .await
        .unwrap();

    assert_eq!(renewed.expire_date.as_deref(), Some("2024-06-15"));
    assert_eq!(renewed.renewal_period, "3月");
    assert_eq!(renewed.last_renewal_type, Some(RenewalType::Auto));
    assert_eq!(renewed.last_renewal_date.as_deref(), Some("2024-03-10"));
    assert_eq!(renewed.original_renewal_period, None);
}

#[tokio::test]
async fn test_manual_renew_infers_period_and_keeps_original() {
    let service = ServerService::new(Store::in_memory());
    let mut input = server_input("manual", "2023-12-15", "3月");
    input.expire_date = Some("2024-03-15".to_owned());
    let server = service
        .add_at(input, at_midnight(2024, 3, 1))
        .await
        .unwrap();

    let renewed = service
        .renew_on(
            &server.id,
            RenewRequest {
                renewal_type: RenewalType::Manual,
                new_expire_date: Some("2025-03-15".to_owned()),
            },
            date(2024, 3, 10),
        )
        .await
        .unwrap();
    assert_eq!(renewed.expire_date.as_deref(), Some("2025-03-15"));
    assert_eq!(renewed.renewal_period, "1年");
    assert_eq!(renewed.original_renewal_period.as_deref(), Some("3月"));
    assert_eq!(renewed.last_renewal_type, Some(RenewalType::Manual));

    let again = service
        .renew_on(
            &server.id,
            RenewRequest {
                renewal_type: RenewalType::Manual,
                new_expire_date: Some("2025-04-15".to_owned()),
            },
            date(2025, 3, 1),
        )
        .await
        .unwrap();
    assert_eq!(again.renewal_period, "1月");
    assert_eq!(again.original_renewal_period.as_deref(), Some("3月"));
}

#[tokio::test]
async fn test_manual_renew_rejects_missing_or_earlier_dates() {
    let service = ServerService::new(Store::in_memory());
    let mut input = server_input("strict", "2023-12-15", "3月");
    input.expire_date = Some("2024-03-15".to_owned());
    let server = service
        .add_at(input, at_midnight(2024, 3, 1))
        .await
        .unwrap();

    let err = service
        .renew_on(
            &server.id,
            RenewRequest {
                renewal_type: RenewalType::Manual,
                new_expire_date: None,
            },
            date(2024, 3, 10),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let err = service
        .renew_on(
            &server.id,
            RenewRequest {
                renewal_type: RenewalType::Manual,
                new_expire_date: Some("2024-03-01".to_owned()),
            },
            date(2024, 3, 10),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let stored = service.get(&server.id).await.unwrap();
    assert_eq!(stored.expire_date.as_deref(), Some("2024-03-15"));
    assert_eq!(stored.last_renewal_type, None);
}

#[tokio::test]
async fn test_legacy_field_types_keep_existing_servers() {
    let store = Store::in_memory();
    store
        .kv()
        .put(
            "servers",
            r#"[{"id":"1","name":"Prod","registerDate":"2024-01-01","renewalPeriod":"1年","price":5}]"#
                .to_owned(),
        )
        .await
        .unwrap();
    let service = ServerService::new(store);

    let servers = service.list().await.unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].server.price.as_deref(), Some("5"));

    let err = service
        .add_at(server_input("Prod", "2024-01-01", "1年"), at_midnight(2024, 2, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_undecodable_collection_refuses_writes() {
    init_test_logging();
    let store = Store::in_memory();
    let blob = r#"[{"id":"1","name":"Prod","registerDate":20240101}]"#;
    store.kv().put("servers", blob.to_owned()).await.unwrap();
    let service = ServerService::new(store.clone());

    let err = service.list().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);

    let err = service
        .add_at(server_input("Prod", "2024-01-01", "1年"), at_midnight(2024, 2, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);

    assert_eq!(store.kv().get("servers").await.unwrap().as_deref(), Some(blob));
}

#[tokio::test]
async fn test_concurrent_read_modify_write_is_last_write_wins() {
    let store = Store::in_memory();
    let writer_a = ServerRepositoryImpl::new(store.clone());
    let writer_b = ServerRepositoryImpl::new(store.clone());

    let mut seen_by_a = writer_a.list().await.unwrap();
    let mut seen_by_b = writer_b.list().await.unwrap();

    let mut first = ServerService::new(Store::in_memory())
        .add_at(server_input("first", "2024-01-01", "1年"), at_midnight(2024, 1, 1))
        .await
        .unwrap();
    first.id = "a".to_owned();
    let mut second = first.clone();
    second.id = "b".to_owned();
    second.name = "second".to_owned();

    seen_by_a.push(first);
    seen_by_b.push(second);
    writer_a.save_all(&seen_by_a).await.unwrap();
    writer_b.save_all(&seen_by_b).await.unwrap();

    // the later write replaces the earlier one wholesale
    let stored = ServerService::new(store).list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].server.name, "second");
}

#[tokio::test]
async fn test_concurrent_adds_both_succeed() {
    let service = ServerService::new(Store::in_memory());
    let now = at_midnight(2024, 1, 1);

    let (a, b) = tokio::join!(
        service.add_at(server_input("left", "2024-01-01", "1年"), now),
        service.add_at(server_input("right", "2024-01-01", "1年"), now),
    );
    a.unwrap();
    b.unwrap();

    // without compare-and-swap one add may clobber the other
    let stored = service.list().await.unwrap();
    assert!((1..=2).contains(&stored.len()), "{stored:?}");
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_category_sort_order_and_reorder() {
    let service = CategoryService::new(Store::in_memory());
    let now = at_midnight(2024, 1, 1);

    let a = service.add_at(category_input("Production"), now).await.unwrap();
    let b = service.add_at(category_input("Staging"), now).await.unwrap();
    assert_eq!(a.sort_order, 0);
    assert_eq!(b.sort_order, 1);
    assert_ne!(a.id, b.id);

    let reordered = service
        .reorder(&[b.id.clone(), "unknown".to_owned()])
        .await
        .unwrap();
    let names: Vec<&str> = reordered.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Staging", "Production"]);

    let listed = service.list().await.unwrap();
    assert_eq!(listed[0].id, b.id);
    assert_eq!(listed[0].sort_order, 0);
    assert_eq!(listed[1].sort_order, 1);

    let err = service.add_at(category_input("  "), now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_category_delete_moves_servers_to_default_bucket() {
    let store = Store::in_memory();
    let categories = CategoryService::new(store.clone());
    let servers = ServerService::new(store);
    let now = at_midnight(2024, 1, 1);

    let doomed = categories.add_at(category_input("Legacy"), now).await.unwrap();
    let kept = categories.add_at(category_input("Current"), now).await.unwrap();

    for (name, category) in [("old-1", &doomed), ("old-2", &doomed), ("new-1", &kept)] {
        let mut input = server_input(name, "2024-01-01", "1年");
        input.category_id = category.id.clone();
        servers.add_at(input, now).await.unwrap();
    }

    let moved = categories.delete(&doomed.id).await.unwrap();
    assert_eq!(moved, 2);

    let remaining = servers.list().await.unwrap();
    let uncategorized = remaining
        .iter()
        .filter(|v| v.server.category_id.is_empty())
        .count();
    assert_eq!(uncategorized, 2);
    assert!(remaining
        .iter()
        .any(|v| v.server.name == "new-1" && v.server.category_id == kept.id));

    let err = categories.delete(&doomed.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

// ============================================================================
// Settings
// ============================================================================

fn telegram_settings(token: &str, chat_id: &str) -> Settings {
    let mut settings = Settings::default();
    settings.telegram.enabled = true;
    settings.telegram.bot_token = token.to_owned();
    settings.telegram.chat_id = chat_id.to_owned();
    settings
}

#[tokio::test]
async fn test_settings_require_complete_credentials() {
    let service = SettingsService::new(Store::in_memory(), secrets(&[]));

    let err = service
        .save(telegram_settings("123456:ABCDEF", ""))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let mut login = Settings::default();
    login.auth.enabled = true;
    let err = service.save(login).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // nothing was persisted
    assert!(!service.get().await.unwrap().telegram.enabled);
}

#[tokio::test]
async fn test_settings_mask_secrets_and_keep_them_on_round_trip() {
    let service = SettingsService::new(Store::in_memory(), secrets(&[]));

    let mut submitted = telegram_settings("123456:ABCDEF", "42");
    submitted.auth.enabled = true;
    submitted.auth.password = "hunter2".to_owned();
    let view = service.save(submitted).await.unwrap();

    assert_eq!(view.settings.telegram.bot_token, "****CDEF");
    assert_eq!(view.settings.auth.password, "********");
    assert!(view.effective.telegram_enabled);
    assert!(view.effective.auth_enabled);

    // the form posts the masked values straight back
    let mut echoed = view.settings.clone();
    echoed.site_title = "My Fleet".to_owned();
    service.save(echoed).await.unwrap();

    let stored = service.get().await.unwrap();
    assert_eq!(stored.telegram.bot_token, "123456:ABCDEF");
    assert_eq!(stored.auth.password, "hunter2");
    assert_eq!(stored.site_title, "My Fleet");
}

#[tokio::test]
async fn test_settings_ignore_submitted_values_for_external_credentials() {
    let sources = secrets(&[("TG_TOKEN", "env-token"), ("TG_ID", "env-chat")]);
    let service = SettingsService::new(Store::in_memory(), sources);

    let mut submitted = telegram_settings("someone-else", "999");
    submitted.telegram.enabled = false;
    let view = service.save(submitted).await.unwrap();

    assert!(view.external.telegram.has_external);
    assert!(view.effective.telegram_enabled);

    let stored = service.get().await.unwrap();
    assert_eq!(stored.telegram.bot_token, "");
    assert_eq!(stored.telegram.chat_id, "");

    let target = service.telegram_target(&stored).unwrap();
    assert_eq!(target.bot_token, "env-token");
    assert_eq!(target.chat_id, "env-chat");
}

// ============================================================================
// External config cleanup
// ============================================================================

#[tokio::test]
async fn test_external_removal_clears_stored_settings_once() {
    let store = Store::in_memory();
    let now = at_midnight(2024, 6, 1);

    let with_pass = ExternalConfigMonitor::new(store.clone(), secrets(&[("PASS", "from-env")]));
    let first = with_pass.check(now).await.unwrap();
    assert!(!first.removal.any());
    assert!(first.snapshot.auth.has_external);

    let repo = SettingsRepositoryImpl::new(store.clone());
    let mut settings = telegram_settings("123456:ABCDEF", "42");
    settings.auth.enabled = true;
    settings.auth.password = "leftover".to_owned();
    repo.save(&settings).await.unwrap();

    let without_pass = ExternalConfigMonitor::new(store.clone(), secrets(&[]));
    let removed = without_pass.check(now + Duration::hours(1)).await.unwrap();
    assert!(removed.removal.auth_removed);
    assert!(!removed.removal.telegram_removed);

    let cleaned = repo.load().await.unwrap();
    assert!(!cleaned.auth.enabled);
    assert_eq!(cleaned.auth.password, "");
    assert!(cleaned.telegram.enabled, "telegram was never external");

    // a later check finds nothing new to clean up
    let mut reconfigured = cleaned.clone();
    reconfigured.auth.enabled = true;
    reconfigured.auth.password = "typed-in".to_owned();
    repo.save(&reconfigured).await.unwrap();

    let again = without_pass.check(now + Duration::hours(2)).await.unwrap();
    assert!(!again.removal.any());
    assert_eq!(repo.load().await.unwrap().auth.password, "typed-in");
    assert_eq!(
        without_pass.last().await.unwrap().unwrap().last_check,
        now + Duration::hours(2)
    );
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_auth_open_when_no_password() {
    let auth = AuthService::new(
        Some(Store::in_memory()),
        secrets(&[]),
        SessionConfig::default(),
    );
    let now = at_midnight(2024, 6, 1);

    assert!(!auth.status().await.unwrap().enabled);
    auth.verify(None, now).await.unwrap();

    let err = auth.login("anything", now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_auth_login_and_verify() {
    let auth = AuthService::new(None, secrets(&[("PASS", "hunter2")]), SessionConfig::default());
    let now = at_midnight(2024, 6, 1);

    let status = auth.status().await.unwrap();
    assert!(status.enabled);
    assert!(status.external.has_external);

    let err = auth.login("wrong", now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);

    let issued = auth.login("hunter2", now).await.unwrap();
    assert_eq!(issued.expires_at, now + auth.ttl());
    assert!(issued
        .token
        .starts_with(&format!("{}.", now.timestamp_millis())));

    auth.verify(Some(issued.token.as_str()), now + Duration::hours(1))
        .await
        .unwrap();

    let err = auth.verify(None, now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);

    let err = auth
        .verify(Some(issued.token.as_str()), now + auth.ttl() + Duration::seconds(1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthExpired);

    let tampered = format!("{}0", issued.token);
    let err = auth.verify(Some(tampered.as_str()), now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);

    let err = auth.verify(Some("not-a-token"), now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);

    // extreme timestamps are rejected without overflowing
    for forged in [
        format!("{}.abcd", i64::MIN),
        "-1.abcd".to_owned(),
        format!("{}.abcd", i64::MAX),
    ] {
        let err = auth.verify(Some(forged.as_str()), now).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid, "{forged}");
    }
}

#[tokio::test]
async fn test_auth_password_change_invalidates_tokens() {
    let store = Store::in_memory();
    let repo = SettingsRepositoryImpl::new(store.clone());
    let mut settings = Settings::default();
    settings.auth.enabled = true;
    settings.auth.password = "first".to_owned();
    repo.save(&settings).await.unwrap();

    let auth = AuthService::new(Some(store), secrets(&[]), SessionConfig::default());
    let now = at_midnight(2024, 6, 1);
    let issued = auth.login("first", now).await.unwrap();
    auth.verify(Some(issued.token.as_str()), now).await.unwrap();

    settings.auth.password = "second".to_owned();
    repo.save(&settings).await.unwrap();

    let err = auth.verify(Some(issued.token.as_str()), now).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);
}

// ============================================================================
// Notification sweep
// ============================================================================

async fn seed_fleet(store: &Store) {
    let now = at_midnight(2024, 6, 1);
    let categories = CategoryService::new(store.clone());
    let production = categories.add_at(category_input("Production"), now).await.unwrap();
    let staging = categories.add_at(category_input("Staging"), now).await.unwrap();

    let servers = ServerService::new(store.clone());
    let fleet = [
        ("web-1", production.id.as_str(), "2024-06-04", None),
        ("web-2", production.id.as_str(), "2024-09-09", None),
        ("stage-1", staging.id.as_str(), "2024-05-30", None),
        ("stage-2", staging.id.as_str(), "2024-09-09", Some(200)),
        ("misc", "", "2024-06-06", None),
    ];
    for (name, category_id, expire, notify_days) in fleet {
        let mut input = server_input(name, "2023-06-01", "1年");
        input.category_id = category_id.to_owned();
        input.expire_date = Some(expire.to_owned());
        input.notify_days = notify_days;
        servers.add_at(input, now).await.unwrap();
    }
}

#[tokio::test]
async fn test_sweep_groups_by_category_and_survives_failed_group() {
    init_test_logging();
    let store = Store::in_memory();
    seed_fleet(&store).await;
    SettingsRepositoryImpl::new(store.clone())
        .save(&telegram_settings("123456:ABCDEF", "42"))
        .await
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::failing_when("Staging"));
    let sources = secrets(&[]);
    let service = NotificationService::new(
        store.clone(),
        SettingsService::new(store, sources),
        notifier.clone(),
    );

    let report = service
        .check_and_notify(at_midnight(2024, 6, 1))
        .await
        .unwrap();
    assert!(!report.skipped);
    assert_eq!(report.checked, 5);
    assert_eq!(report.due, 4);
    assert_eq!(report.groups_sent, 2);
    assert_eq!(report.groups_failed, 1);
    assert_eq!(report.servers_notified, 2);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0.chat_id, "42");
    assert!(sent[0].1.contains("Category: <b>Production</b> (1 server(s))"));
    assert!(sent[0].1.contains("web-1"));
    assert!(sent[0].1.contains("Expires in 3 day(s)"));
    assert!(!sent[0].1.contains("web-2"));
    assert!(sent[1].1.contains("Category: <b>Uncategorized</b>"));
    assert!(sent[1].1.contains("misc"));
}

#[tokio::test]
async fn test_sweep_skipped_when_telegram_disabled() {
    let store = Store::in_memory();
    seed_fleet(&store).await;

    let notifier = Arc::new(RecordingNotifier::default());
    let service = NotificationService::new(
        store.clone(),
        SettingsService::new(store, secrets(&[])),
        notifier.clone(),
    );

    let report = service
        .check_and_notify(at_midnight(2024, 6, 1))
        .await
        .unwrap();
    assert!(report.skipped);
    assert_eq!(report.checked, 0);
    assert!(notifier.sent().is_empty());

    let err = service.send_test(at_midnight(2024, 6, 1)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_send_test_message_uses_external_credentials() {
    let store = Store::in_memory();
    let notifier = Arc::new(RecordingNotifier::default());
    let sources = secrets(&[("TG_TOKEN", "env-token"), ("TG_ID", "env-chat")]);
    let service = NotificationService::new(
        store.clone(),
        SettingsService::new(store, sources),
        notifier.clone(),
    );

    service.send_test(at_midnight(2024, 6, 1)).await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0.bot_token, "env-token");
}
