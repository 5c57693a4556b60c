use serde::{Deserialize, Serialize};

/// A catalog entry with fixed nutrition and price attributes.
///
/// Catalog rows are read-only to the ordering core; they are loaded by the
/// seed importer and identified by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub fiber: u32,
    pub price: f64,
    #[serde(default)]
    pub favorite: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, calories: u32, protein: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein,
            carbs: 0,
            fats: 0,
            fiber: 0,
            price,
            favorite: false,
        }
    }

    pub fn with_macros(mut self, carbs: u32, fats: u32, fiber: u32) -> Self {
        self.carbs = carbs;
        self.fats = fats;
        self.fiber = fiber;
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }
}
