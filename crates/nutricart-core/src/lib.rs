//! NutriCart Core
//!
//! Domain model and pure logic for the food catalog and order ledger:
//! - Catalog, order and nutrition model types
//! - Parameterized filter-query builder
//! - Cart quantity collapse and totals
//! - Input validation rules
//! - Structured error facility and logging macros

pub mod cart;
pub mod errors;
pub mod filter;
pub mod logging_facility;
pub mod model;
pub mod rules;

pub use errors::{ExError, ExErrorKind, NutriCartError, Result};
