//! User and session persistence for the bundled identity provider

#![allow(clippy::result_large_err)]

use crate::errors::{sqlite_op, Result};
use nutricart_core::model::{UserId, UserProfile};
use rusqlite::{Connection, OptionalExtension, Row, Transaction};

/// A user row including the stored password hash
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub profile: UserProfile,
    pub password_hash: String,
}

/// SQLite repository for users and sessions
pub struct UserRepo;

impl UserRepo {
    /// Next user id: one past the maximum, starting at 1
    pub fn next_user_id(tx: &Transaction) -> Result<UserId> {
        tx.query_row(
            "SELECT COALESCE(MAX(user_id), 0) + 1 FROM users",
            [],
            |row| row.get(0),
        )
        .map_err(sqlite_op("next_user_id"))
    }

    pub fn insert_user_tx(
        tx: &Transaction,
        profile: &UserProfile,
        password_hash: &str,
        login_history: &str,
    ) -> Result<()> {
        tx.execute(
            "INSERT INTO users (user_id, first_name, last_name, email, password_hash, login_history)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                profile.id,
                profile.first_name,
                profile.last_name,
                profile.email,
                password_hash,
                login_history,
            ],
        )
        .map_err(sqlite_op("insert_user"))?;
        Ok(())
    }

    pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<UserRecord>> {
        conn.query_row(
            "SELECT user_id, first_name, last_name, email, password_hash
             FROM users WHERE email = ?1",
            [email],
            |row| {
                Ok(UserRecord {
                    profile: row_to_profile(row)?,
                    password_hash: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(sqlite_op("find_user_by_email"))
    }

    pub fn touch_login(conn: &Connection, user_id: UserId, at: &str) -> Result<()> {
        conn.execute(
            "UPDATE users SET login_history = ?1 WHERE user_id = ?2",
            rusqlite::params![at, user_id],
        )
        .map_err(sqlite_op("touch_login"))?;
        Ok(())
    }

    pub fn insert_session(
        conn: &Connection,
        token: &str,
        user_id: UserId,
        issued_at: i64,
        expires_at: i64,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO sessions (token, user_id, issued_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![token, user_id, issued_at, expires_at],
        )
        .map_err(sqlite_op("insert_session"))?;
        Ok(())
    }

    /// The user owning a session that has not expired at `now`
    pub fn find_session_user(
        conn: &Connection,
        token: &str,
        now: i64,
    ) -> Result<Option<UserProfile>> {
        conn.query_row(
            "SELECT u.user_id, u.first_name, u.last_name, u.email
             FROM sessions s JOIN users u ON s.user_id = u.user_id
             WHERE s.token = ?1 AND s.expires_at > ?2",
            rusqlite::params![token, now],
            row_to_profile,
        )
        .optional()
        .map_err(sqlite_op("find_session_user"))
    }

    /// Remove sessions expired at `now`; returns the number removed
    pub fn purge_expired_sessions(conn: &Connection, now: i64) -> Result<usize> {
        conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", [now])
            .map_err(sqlite_op("purge_expired_sessions"))
    }
}

fn row_to_profile(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}
