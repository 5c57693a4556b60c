//! NutriCart Store - SQLite persistence layer
//!
//! Provides:
//! - Connection setup (foreign keys, WAL, busy timeout)
//! - Embedded SQL migrations with checksums
//! - Repositories for the catalog, the order ledger and users
//! - Catalog seed parser and importer

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

pub use errors::Result;
