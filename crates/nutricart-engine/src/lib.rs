//! NutriCart Engine - Orchestration layer
//!
//! Coordinates core domain logic and the SQLite store: the atomic order
//! commit, the read-only query surface, and the bundled identity provider.

pub mod commands;
pub mod identity;
