// ABOUTME: Session authentication against the effective password
// ABOUTME: Issues salted timestamp-hash tokens and verifies them in constant time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! Session authentication
//!
//! A token is `"<issued_at_ms>.<hex sha256(issued_at_ms:password:salt)>"`.
//! Changing the password invalidates every issued token. When login is not
//! effectively enabled, every request is allowed.

use crate::config::environment::SessionConfig;
use crate::config::SecretSources;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{ExternalStatus, Settings};
use crate::repositories::{SettingsRepository, SettingsRepositoryImpl};
use crate::storage::Store;
use chrono::{DateTime, Duration, Utc};
use expiry_engine::{effective_enabled, ConfigCategory, ConfigKey};
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Allowed clock skew for tokens issued "in the future"
const MAX_CLOCK_SKEW_MS: i64 = 60_000;

/// Upper bound on configured session lifetime (ten years)
const MAX_SESSION_TTL_HOURS: u64 = 24 * 365 * 10;

/// Whether the dashboard requires a login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    /// Login required
    pub enabled: bool,
    /// Whether the password comes from outside the stored settings
    pub external: ExternalStatus,
}

/// A freshly issued session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// Opaque token for the `Authorization` header or cookie
    pub token: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Login and token verification
#[derive(Clone)]
pub struct AuthService {
    settings: Option<SettingsRepositoryImpl>,
    secrets: SecretSources,
    session: SessionConfig,
}

impl AuthService {
    /// Create a service; without a store only external passwords apply
    #[must_use]
    pub fn new(store: Option<Store>, secrets: SecretSources, session: SessionConfig) -> Self {
        Self {
            settings: store.map(SettingsRepositoryImpl::new),
            secrets,
            session,
        }
    }

    async fn stored_settings(&self) -> AppResult<Settings> {
        match &self.settings {
            Some(repo) => repo.load().await,
            None => Ok(Settings::default()),
        }
    }

    /// Effective password, `None` when login is not required
    ///
    /// An effectively enabled login with an empty password is treated as open.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn effective_password(&self) -> AppResult<Option<String>> {
        let settings = self.stored_settings().await?;
        let resolver = self.secrets.resolver();
        let external = resolver.has_external(ConfigCategory::Auth);
        if !effective_enabled(&external, settings.auth.enabled) {
            return Ok(None);
        }
        let password = resolver.resolve_from(ConfigKey::Password, &settings);
        Ok(Some(password).filter(|p| !p.is_empty()))
    }

    /// Login requirement for the login page
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn status(&self) -> AppResult<AuthStatus> {
        Ok(AuthStatus {
            enabled: self.effective_password().await?.is_some(),
            external: self
                .secrets
                .resolver()
                .has_external(ConfigCategory::Auth),
        })
    }

    /// Check `password` and issue a token
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when login is not enabled, or `AuthInvalid` for a
    /// wrong password
    pub async fn login(&self, password: &str, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let Some(expected) = self.effective_password().await? else {
            return Err(AppError::invalid_input("Login is not enabled"));
        };

        let matches: bool = password.as_bytes().ct_eq(expected.as_bytes()).into();
        AppLogger::log_auth_event("login", matches);
        if !matches {
            return Err(AppError::auth_invalid("Incorrect password"));
        }

        let issued_at = now.timestamp_millis();
        Ok(IssuedToken {
            token: format!("{issued_at}.{}", self.token_hash(issued_at, &expected)),
            expires_at: now + self.ttl(),
        })
    }

    /// Verify a token; always succeeds when login is not required
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` for a missing token, `AuthExpired` for an expired
    /// one, or `AuthInvalid` for anything else that does not verify
    pub async fn verify(&self, token: Option<&str>, now: DateTime<Utc>) -> AppResult<()> {
        let Some(password) = self.effective_password().await? else {
            return Ok(());
        };
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(AppError::auth_required)?;

        let (issued_at, hash) = token
            .split_once('.')
            .ok_or_else(|| AppError::auth_invalid("Malformed session token"))?;
        let issued_at: i64 = issued_at
            .parse()
            .map_err(|_| AppError::auth_invalid("Malformed session token"))?;

        let now_ms = now.timestamp_millis();
        if issued_at < 0 || issued_at > now_ms.saturating_add(MAX_CLOCK_SKEW_MS) {
            return Err(AppError::auth_invalid("Session token timestamp out of range"));
        }
        let age_ms = now_ms
            .checked_sub(issued_at)
            .ok_or_else(|| AppError::auth_invalid("Session token timestamp out of range"))?;
        if age_ms > self.ttl().num_milliseconds() {
            return Err(AppError::auth_expired());
        }

        let expected = self.token_hash(issued_at, &password);
        if bool::from(hash.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(AppError::auth_invalid("Invalid session token"))
        }
    }

    /// Session lifetime
    #[must_use]
    pub fn ttl(&self) -> Duration {
        let hours = self.session.ttl_hours.min(MAX_SESSION_TTL_HOURS);
        Duration::hours(i64::try_from(hours).unwrap_or_default())
    }

    fn token_hash(&self, issued_at: i64, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{issued_at}:{password}:{}", self.session.token_salt).as_bytes());
        hex::encode(hasher.finalize())
    }
}
