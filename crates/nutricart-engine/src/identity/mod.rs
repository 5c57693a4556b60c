//! Identity provider seam.
//!
//! The ordering core only needs a user id; registration, login and token
//! verification live behind `IdentityProvider` so the bundled SQLite
//! implementation can be swapped for an external one.

#![allow(clippy::result_large_err)]

mod password;
mod sqlite;

pub use sqlite::SqliteIdentityProvider;

use nutricart_core::model::UserProfile;
use nutricart_core_types::Sensitive;
use nutricart_store::errors::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Registration payload. Fields are optional so a missing one is reported
/// as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<Sensitive<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<Sensitive<String>>,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// `MissingField` for blank fields, `AlreadyExists` for a taken email.
    fn register(&self, conn: &mut Connection, registration: &Registration) -> Result<AuthSession>;

    /// # Errors
    ///
    /// `MissingField` for blank fields, `Unauthorised` for a bad pair.
    fn login(&self, conn: &Connection, credentials: &Credentials) -> Result<AuthSession>;

    /// # Errors
    ///
    /// `Unauthorised` for an unknown or expired token.
    fn verify(&self, conn: &Connection, token: &str) -> Result<UserProfile>;
}
