use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use super::Item;

/// Aggregate nutrition and price for a cart or an order.
///
/// Field names match the checkout payload (`calories`, …, `price`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    #[serde(default)]
    pub calories: i64,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: i64,
    #[serde(default)]
    pub fats: i64,
    #[serde(default)]
    pub fiber: i64,
    #[serde(default)]
    pub price: f64,
}

impl NutritionTotals {
    /// Totals for `quantity` servings of one item.
    pub fn of_item(item: &Item, quantity: u32) -> Self {
        let q = i64::from(quantity);
        Self {
            calories: i64::from(item.calories) * q,
            protein: i64::from(item.protein) * q,
            carbs: i64::from(item.carbs) * q,
            fats: i64::from(item.fats) * q,
            fiber: i64::from(item.fiber) * q,
            price: item.price * f64::from(quantity),
        }
    }

    /// Price rounded to whole cents.
    pub fn price_cents(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }

    /// Equal nutrition and equal price to the cent.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.calories == other.calories
            && self.protein == other.protein
            && self.carbs == other.carbs
            && self.fats == other.fats
            && self.fiber == other.fiber
            && self.price_cents() == other.price_cents()
    }
}

impl Add for NutritionTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
            fiber: self.fiber + rhs.fiber,
            price: self.price + rhs.price,
        }
    }
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
