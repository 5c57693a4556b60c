//! Domain model for the catalog and the order ledger.

pub mod item;
pub mod nutrition;
pub mod order;
pub mod stats;
pub mod user;

pub use item::Item;
pub use nutrition::NutritionTotals;
pub use order::{Order, OrderDetail, OrderLine, OrderWithUser};
pub use stats::UserStats;
pub use user::UserProfile;

/// Identifier of a persisted order.
pub type OrderId = i64;

/// Identifier of a user record owned by the identity provider.
pub type UserId = i64;
