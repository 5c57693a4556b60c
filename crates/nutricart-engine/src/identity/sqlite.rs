//! Identity provider backed by the `users` and `sessions` tables.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use chrono::{Duration, Utc};
use nutricart_core::errors::NutriCartError;
use nutricart_core::model::UserProfile;
use nutricart_core_types::Sensitive;
use nutricart_core::rules::validation::require_field;
use nutricart_core::{log_op_end, log_op_error, log_op_start};
use nutricart_store::errors::{sqlite_op, Result};
use nutricart_store::repo::UserRepo;
use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::{AuthSession, Credentials, IdentityProvider, Registration};

/// Bundled provider: argon2 password hashes, UUIDv7 bearer tokens.
#[derive(Debug, Clone)]
pub struct SqliteIdentityProvider {
    session_ttl: Duration,
}

impl Default for SqliteIdentityProvider {
    fn default() -> Self {
        Self {
            session_ttl: Duration::hours(24),
        }
    }
}

impl SqliteIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    fn issue_session(&self, conn: &Connection, user: UserProfile) -> Result<AuthSession> {
        let token = Uuid::now_v7().to_string();
        let issued_at = Utc::now().timestamp();
        let expires_at = issued_at + self.session_ttl.num_seconds();
        UserRepo::insert_session(conn, &token, user.id, issued_at, expires_at)?;
        Ok(AuthSession { user, token })
    }

    fn register_inner(&self, conn: &mut Connection, registration: &Registration) -> Result<AuthSession> {
        let first_name = require_field("firstName", registration.first_name.as_deref())?;
        let last_name = require_field("lastName", registration.last_name.as_deref())?;
        let email = normalize_email(require_field("email", registration.email.as_deref())?);
        let password = require_password(registration.password.as_ref())?;

        // Hash before taking the write lock.
        let password_hash = hash_password(password)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(sqlite_op("begin_register"))?;
        if UserRepo::find_by_email(&tx, &email)?.is_some() {
            return Err(NutriCartError::EmailTaken { email }.into());
        }
        let profile = UserProfile {
            id: UserRepo::next_user_id(&tx)?,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
        };
        UserRepo::insert_user_tx(&tx, &profile, &password_hash, &Utc::now().to_rfc3339())?;
        tx.commit().map_err(sqlite_op("register"))?;

        self.issue_session(conn, profile)
    }

    fn login_inner(&self, conn: &Connection, credentials: &Credentials) -> Result<AuthSession> {
        let email = normalize_email(require_field("email", credentials.email.as_deref())?);
        let password = require_password(credentials.password.as_ref())?;

        let record = UserRepo::find_by_email(conn, &email)?
            .filter(|record| verify_password(password, &record.password_hash))
            .ok_or(NutriCartError::InvalidCredentials)?;

        UserRepo::touch_login(conn, record.profile.id, &Utc::now().to_rfc3339())?;
        self.issue_session(conn, record.profile)
    }
}

impl IdentityProvider for SqliteIdentityProvider {
    fn register(&self, conn: &mut Connection, registration: &Registration) -> Result<AuthSession> {
        log_op_start!("register");
        let start = Instant::now();
        let result = self.register_inner(conn, registration);
        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(session) => log_op_end!("register", duration_ms = elapsed, user_id = session.user.id),
            Err(e) => {
                let e_clone = e.clone();
                log_op_error!("register", e_clone, duration_ms = elapsed);
            }
        }
        result
    }

    fn login(&self, conn: &Connection, credentials: &Credentials) -> Result<AuthSession> {
        log_op_start!("login");
        let start = Instant::now();
        let result = self.login_inner(conn, credentials);
        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(session) => log_op_end!("login", duration_ms = elapsed, user_id = session.user.id),
            Err(e) => {
                let e_clone = e.clone();
                log_op_error!("login", e_clone, duration_ms = elapsed);
            }
        }
        result
    }

    fn verify(&self, conn: &Connection, token: &str) -> Result<UserProfile> {
        let token = token.trim();
        if token.is_empty() {
            return Err(NutriCartError::InvalidToken.into());
        }
        UserRepo::find_session_user(conn, token, Utc::now().timestamp())?
            .ok_or_else(|| NutriCartError::InvalidToken.into())
    }
}

/// Emails compare case-insensitively.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Passwords are used verbatim: not trimmed, only required non-empty.
fn require_password(password: Option<&Sensitive<String>>) -> Result<&str> {
    password
        .map(|p| p.expose().as_str())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            NutriCartError::MissingField {
                field: "password".to_string(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_password_is_not_trimmed_but_must_be_present() {
        let padded = Sensitive::new(" pw ".to_string());
        assert_eq!(require_password(Some(&padded)).unwrap(), " pw ");

        let empty = Sensitive::new(String::new());
        assert!(require_password(Some(&empty)).is_err());
        assert!(require_password(None).is_err());
    }

    #[test]
    fn test_default_ttl_is_one_day() {
        assert_eq!(SqliteIdentityProvider::new().session_ttl, Duration::hours(24));
    }
}
