//! Order ledger types.
//!
//! JSON field names are the lowercase column names the calendar client
//! reads (`orderid`, `totalcalories`, `itemname`, …).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Item, NutritionTotals, OrderId, UserId};

/// A persisted checkout event with aggregate totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderid")]
    pub order_id: OrderId,
    #[serde(rename = "userid")]
    pub user_id: UserId,
    pub date: NaiveDate,
    pub favorite: bool,
    pub notes: String,
    #[serde(rename = "totalcalories")]
    pub total_calories: i64,
    #[serde(rename = "totalprotein")]
    pub total_protein: i64,
    #[serde(rename = "totalcarbs")]
    pub total_carbs: i64,
    #[serde(rename = "totalfats")]
    pub total_fats: i64,
    #[serde(rename = "totalfiber")]
    pub total_fiber: i64,
    pub receipt: f64,
}

impl Order {
    /// A freshly committed order: not a favorite, no notes.
    pub fn placed(order_id: OrderId, user_id: UserId, date: NaiveDate, totals: &NutritionTotals) -> Self {
        Self {
            order_id,
            user_id,
            date,
            favorite: false,
            notes: String::new(),
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_carbs: totals.carbs,
            total_fats: totals.fats,
            total_fiber: totals.fiber,
            receipt: totals.price,
        }
    }

    pub fn totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.total_calories,
            protein: self.total_protein,
            carbs: self.total_carbs,
            fats: self.total_fats,
            fiber: self.total_fiber,
            price: self.receipt,
        }
    }
}

/// An order joined with the name of the user who placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithUser {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

/// A line item joined with its catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "orderid")]
    pub order_id: OrderId,
    #[serde(rename = "itemname")]
    pub item_name: String,
    pub quantity: u32,
    #[serde(flatten)]
    pub item: Item,
}

/// Order detail projection. `order` is `None` for an unknown id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Option<Order>,
    pub items: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_json_uses_lowercase_column_names() {
        let totals = NutritionTotals {
            calories: 1400,
            protein: 52,
            carbs: 160,
            fats: 56,
            fiber: 6,
            price: 3.98,
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let order = Order::placed(1000, 1, date, &totals);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["orderid"], 1000);
        assert_eq!(json["userid"], 1);
        assert_eq!(json["date"], "2026-10-16");
        assert_eq!(json["favorite"], false);
        assert_eq!(json["notes"], "");
        assert_eq!(json["totalcalories"], 1400);
        assert_eq!(json["receipt"], 3.98);
    }

    #[test]
    fn test_missing_order_detail_serializes_null() {
        let detail = OrderDetail {
            order: None,
            items: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json["order"].is_null());
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn test_order_line_flattens_item() {
        let line = OrderLine {
            order_id: 1000,
            item_name: "Churro".into(),
            quantity: 2,
            item: Item::new("Churro", 570, 6, 1.99),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["itemname"], "Churro");
        assert_eq!(json["name"], "Churro");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["calories"], 570);
    }
}
