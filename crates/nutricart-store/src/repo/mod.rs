//! Repository layer over the SQLite schema
//!
//! Unit structs with associated functions; every function takes the
//! connection (or transaction) it runs on, so callers decide the scope.

pub mod catalog;
pub mod orders;
pub mod users;

pub use catalog::CatalogRepo;
pub use orders::{OrderRepo, ORDER_ID_FLOOR};
pub use users::{UserRecord, UserRepo};
