// ABOUTME: Server business logic: validation, derived expiry, CRUD, and the renewal flow
// ABOUTME: Names are unique after stripping emoji and whitespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use super::{generate_id, non_blank};
use crate::errors::{AppError, AppResult};
use expiry_core::models::server::{lenient_days, notify_days_from_value};
use crate::models::{normalize_server_name, RenewalType, Server};
use crate::repositories::{ServerRepository, ServerRepositoryImpl};
use crate::storage::Store;
use chrono::{DateTime, NaiveDate, Utc};
use expiry_engine::{add_period, evaluate, infer_period, parse_date, ExpiryInfo, RenewalPeriod};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields accepted when adding a server
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInput {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// IP address
    #[serde(default)]
    pub ip: String,
    /// Hosting provider
    #[serde(default)]
    pub provider: String,
    /// Category id; empty for the default bucket
    #[serde(default)]
    pub category_id: String,
    /// Registration date (`YYYY-MM-DD`)
    #[serde(default)]
    pub register_date: String,
    /// Renewal period such as `1月`; empty means one month
    #[serde(default)]
    pub renewal_period: String,
    /// Explicit expiry date overriding the derived one
    #[serde(default)]
    pub expire_date: Option<String>,
    /// Price label
    #[serde(default)]
    pub price: Option<String>,
    /// Renewal page
    #[serde(default)]
    pub renewal_link: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Option<String>,
    /// Tag colour
    #[serde(default)]
    pub tag_color: Option<String>,
    /// Per-server reminder lead time
    #[serde(default, deserialize_with = "lenient_days")]
    pub notify_days: Option<u32>,
}

/// Partial update; absent fields keep their stored value
///
/// Optional text fields are cleared by sending an empty string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUpdate {
    /// Display name
    pub name: Option<String>,
    /// IP address
    pub ip: Option<String>,
    /// Hosting provider
    pub provider: Option<String>,
    /// Category id
    pub category_id: Option<String>,
    /// Registration date
    pub register_date: Option<String>,
    /// Renewal period
    pub renewal_period: Option<String>,
    /// Explicit expiry date; empty re-derives it
    pub expire_date: Option<String>,
    /// Price label
    pub price: Option<String>,
    /// Renewal page
    pub renewal_link: Option<String>,
    /// Free-form tags
    pub tags: Option<String>,
    /// Tag colour
    pub tag_color: Option<String>,
    /// Reminder lead time as a number or numeric string; empty clears it
    pub notify_days: Option<serde_json::Value>,
}

/// Renewal action
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewRequest {
    /// `auto` extends by the renewal period, `manual` sets an explicit date
    pub renewal_type: RenewalType,
    /// Required for manual renewals
    #[serde(default)]
    pub new_expire_date: Option<String>,
}

/// Server with its derived expiry fields
#[derive(Debug, Clone, Serialize)]
pub struct ServerView {
    /// Stored record
    #[serde(flatten)]
    pub server: Server,
    /// `daysRemaining`, `cycleDays`, and `status`
    #[serde(flatten)]
    pub expiry: ExpiryInfo,
}

/// Server operations over the `servers` collection
#[derive(Clone)]
pub struct ServerService {
    servers: ServerRepositoryImpl,
}

impl ServerService {
    /// Create a service over `store`
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self {
            servers: ServerRepositoryImpl::new(store),
        }
    }

    /// All servers with status computed now
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn list(&self) -> AppResult<Vec<ServerView>> {
        self.list_at(Utc::now()).await
    }

    /// All servers with status computed as of `as_of`
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn list_at(&self, as_of: DateTime<Utc>) -> AppResult<Vec<ServerView>> {
        Ok(self
            .servers
            .list()
            .await?
            .into_iter()
            .map(|server| {
                let expiry =
                    evaluate(server.expire_date.as_deref(), &server.renewal_period, as_of);
                ServerView { server, expiry }
            })
            .collect())
    }

    /// One server by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, id: &str) -> AppResult<Server> {
        self.servers
            .list()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Server {id}")))
    }

    /// Add a server
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or duplicate name, a missing or
    /// malformed register date, or an unparseable renewal period
    pub async fn add(&self, input: ServerInput) -> AppResult<Server> {
        self.add_at(input, Utc::now()).await
    }

    /// Add a server with an explicit creation time
    ///
    /// # Errors
    ///
    /// See [`ServerService::add`]
    pub async fn add_at(&self, input: ServerInput, now: DateTime<Utc>) -> AppResult<Server> {
        let mut servers = self.servers.list().await?;

        let name = validate_name(&input.name, &servers, None)?;
        let register = require_date("registerDate", &input.register_date)?;
        let period = require_period(&input.renewal_period)?;
        let expire = match non_blank(input.expire_date) {
            Some(explicit) => require_date("expireDate", &explicit)?,
            None => derive_expire(register, period)?,
        };

        let id = generate_id(now, |candidate| servers.iter().any(|s| s.id == candidate));
        let server = Server {
            id,
            name,
            ip: input.ip.trim().to_owned(),
            provider: input.provider.trim().to_owned(),
            category_id: input.category_id.trim().to_owned(),
            register_date: register.to_string(),
            renewal_period: period.to_string(),
            original_renewal_period: None,
            expire_date: Some(expire.to_string()),
            last_renewal_date: None,
            last_renewal_type: None,
            price: non_blank(input.price),
            renewal_link: non_blank(input.renewal_link),
            tags: non_blank(input.tags),
            tag_color: non_blank(input.tag_color),
            notify_days: input.notify_days,
            created_at: now.to_rfc3339(),
        };

        servers.push(server.clone());
        self.servers.save_all(&servers).await?;

        info!(server_id = %server.id, expire_date = %expire, "Server added");
        Ok(server)
    }

    /// Apply a partial update
    ///
    /// The expiry date is re-derived when the register date or period changes
    /// and no explicit expiry date is sent.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or the validation errors of
    /// [`ServerService::add`]
    pub async fn update(&self, id: &str, update: ServerUpdate) -> AppResult<Server> {
        let mut servers = self.servers.list().await?;
        let index = position(&servers, id)?;

        let name = match &update.name {
            Some(name) => Some(validate_name(name, &servers, Some(id))?),
            None => None,
        };

        let server = &mut servers[index];
        if let Some(name) = name {
            server.name = name;
        }
        if let Some(ip) = update.ip {
            server.ip = ip.trim().to_owned();
        }
        if let Some(provider) = update.provider {
            server.provider = provider.trim().to_owned();
        }
        if let Some(category_id) = update.category_id {
            server.category_id = category_id.trim().to_owned();
        }

        let mut schedule_changed = false;
        if let Some(register_date) = update.register_date {
            server.register_date = require_date("registerDate", &register_date)?.to_string();
            schedule_changed = true;
        }
        if let Some(renewal_period) = update.renewal_period {
            server.renewal_period = require_period(&renewal_period)?.to_string();
            schedule_changed = true;
        }

        match update.expire_date.map(|d| d.trim().to_owned()) {
            Some(explicit) if !explicit.is_empty() => {
                server.expire_date = Some(require_date("expireDate", &explicit)?.to_string());
            }
            Some(_) => server.expire_date = Some(derived_expire_of(server)?.to_string()),
            None if schedule_changed => {
                server.expire_date = Some(derived_expire_of(server)?.to_string());
            }
            None => {}
        }

        if let Some(price) = update.price {
            server.price = non_blank(Some(price));
        }
        if let Some(link) = update.renewal_link {
            server.renewal_link = non_blank(Some(link));
        }
        if let Some(tags) = update.tags {
            server.tags = non_blank(Some(tags));
        }
        if let Some(color) = update.tag_color {
            server.tag_color = non_blank(Some(color));
        }
        if let Some(days) = update.notify_days {
            server.notify_days = notify_days_from_value(&days);
        }

        let updated = server.clone();
        self.servers.save_all(&servers).await?;

        info!(server_id = %id, "Server updated");
        Ok(updated)
    }

    /// Delete a server by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut servers = self.servers.list().await?;
        let index = position(&servers, id)?;
        servers.remove(index);
        self.servers.save_all(&servers).await?;

        info!(server_id = %id, "Server deleted");
        Ok(())
    }

    /// Renew a server today
    ///
    /// # Errors
    ///
    /// See [`ServerService::renew_on`]
    pub async fn renew(&self, id: &str, request: RenewRequest) -> AppResult<Server> {
        self.renew_on(id, request, Utc::now().date_naive()).await
    }

    /// Renew a server as of `today`
    ///
    /// Auto renewal extends the current expiry date (or `today` when there is
    /// none) by the renewal period. Manual renewal takes an explicit date later
    /// than the current expiry, infers the period it represents, and remembers
    /// the period the server had before its first manual renewal.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, `MissingRequiredField` when
    /// a manual renewal has no date, or `InvalidInput` when that date is not
    /// after the current expiry
    pub async fn renew_on(
        &self,
        id: &str,
        request: RenewRequest,
        today: NaiveDate,
    ) -> AppResult<Server> {
        let mut servers = self.servers.list().await?;
        let index = position(&servers, id)?;
        let server = &mut servers[index];

        let current_expire = server.expire_date.as_deref().and_then(parse_date);
        let base = current_expire.unwrap_or(today);

        let new_expire = match request.renewal_type {
            RenewalType::Auto => {
                let period = RenewalPeriod::parse_or_default(&server.renewal_period);
                add_period(base, period).ok_or_else(|| {
                    AppError::invalid_input("Renewed expiry date is out of range")
                })?
            }
            RenewalType::Manual => {
                let raw = non_blank(request.new_expire_date)
                    .ok_or_else(|| AppError::missing_field("newExpireDate"))?;
                let new_expire = require_date("newExpireDate", &raw)?;
                let inferred = infer_period(base, new_expire).ok_or_else(|| {
                    AppError::invalid_input(format!(
                        "New expiry date {new_expire} must be after the current expiry date {base}"
                    ))
                })?;
                if server.original_renewal_period.is_none() {
                    server.original_renewal_period = Some(server.renewal_period.clone());
                }
                server.renewal_period = inferred.to_string();
                new_expire
            }
        };

        server.expire_date = Some(new_expire.to_string());
        server.last_renewal_date = Some(today.to_string());
        server.last_renewal_type = Some(request.renewal_type);

        let renewed = server.clone();
        self.servers.save_all(&servers).await?;

        info!(
            server_id = %id,
            renewal_type = ?request.renewal_type,
            expire_date = %new_expire,
            "Server renewed"
        );
        Ok(renewed)
    }
}

fn position(servers: &[Server], id: &str) -> AppResult<usize> {
    servers
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| AppError::not_found(format!("Server {id}")))
}

/// Trimmed name, rejected when empty after normalisation or already taken
fn validate_name(name: &str, servers: &[Server], exclude_id: Option<&str>) -> AppResult<String> {
    let normalized = normalize_server_name(name);
    if normalized.is_empty() {
        return Err(AppError::invalid_input("Server name cannot be empty"));
    }
    let duplicate = servers
        .iter()
        .filter(|s| Some(s.id.as_str()) != exclude_id)
        .any(|s| normalize_server_name(&s.name) == normalized);
    if duplicate {
        return Err(AppError::already_exists(format!(
            "A server named \"{}\" already exists",
            name.trim()
        )));
    }
    Ok(name.trim().to_owned())
}

fn require_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    parse_date(value)
        .ok_or_else(|| AppError::invalid_format(format!("{field} must be a date (YYYY-MM-DD)")))
}

/// Parsed period; blank input takes the one-month form default
fn require_period(value: &str) -> AppResult<RenewalPeriod> {
    if value.trim().is_empty() {
        return Ok(RenewalPeriod::FORM_DEFAULT);
    }
    RenewalPeriod::parse(value).ok_or_else(|| {
        AppError::invalid_format(format!(
            "Invalid renewal period \"{}\"; expected a number followed by 天, 月, 个月, or 年",
            value.trim()
        ))
    })
}

fn derive_expire(register: NaiveDate, period: RenewalPeriod) -> AppResult<NaiveDate> {
    add_period(register, period)
        .ok_or_else(|| AppError::invalid_input("Derived expiry date is out of range"))
}

fn derived_expire_of(server: &Server) -> AppResult<NaiveDate> {
    let register = require_date("registerDate", &server.register_date)?;
    derive_expire(register, RenewalPeriod::parse_or_default(&server.renewal_period))
}
