//! Catalog seed format, version 0
//!
//! ```yaml
//! schema_version: 0
//! items:
//!   - name: Slice of Pizza
//!     calories: 700
//!     protein: 26
//!     carbs: 80
//!     fats: 28
//!     fiber: 3
//!     price: 1.99
//!     favorite: true
//! ```

use nutricart_core::model::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeedV0 {
    pub schema_version: u32,
    #[serde(default)]
    pub items: Vec<Item>,
}
