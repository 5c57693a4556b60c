use serde::{Deserialize, Serialize};

/// Aggregates over one user's orders.
///
/// The averages and `total_spent` are `None` when the user has no orders:
/// "no data" is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_orders: i64,
    pub avg_calories: Option<f64>,
    pub avg_protein: Option<f64>,
    pub total_spent: Option<f64>,
}

impl UserStats {
    pub fn empty() -> Self {
        Self {
            total_orders: 0,
            avg_calories: None,
            avg_protein: None,
            total_spent: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_orders > 0
    }
}
