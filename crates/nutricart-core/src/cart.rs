//! Cart handling: collapsing repeated selections into line quantities.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Item, NutritionTotals};

/// A distinct item in a cart with the number of times it was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub quantity: u32,
}

/// Collapse a cart (one entry per selection) into one line per distinct name.
///
/// Lines come back sorted by name so persistence order is deterministic.
pub fn collapse_quantities<S: AsRef<str>>(selections: &[S]) -> Vec<CartLine> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for name in selections {
        *counts.entry(name.as_ref()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, quantity)| CartLine {
            name: name.to_string(),
            quantity,
        })
        .collect()
}

/// Recompute totals for collapsed lines from catalog data.
///
/// Returns the names missing from `catalog` as the error value.
pub fn recompute_totals(
    lines: &[CartLine],
    catalog: &HashMap<String, Item>,
) -> std::result::Result<NutritionTotals, Vec<String>> {
    let mut missing = Vec::new();
    let mut totals = NutritionTotals::default();
    for line in lines {
        match catalog.get(&line.name) {
            Some(item) => totals += NutritionTotals::of_item(item, line.quantity),
            None => missing.push(line.name.clone()),
        }
    }
    if missing.is_empty() {
        Ok(totals)
    } else {
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_pizza_pizza_salad() {
        let lines = collapse_quantities(&["Pizza", "Pizza", "Salad"]);
        assert_eq!(
            lines,
            vec![
                CartLine {
                    name: "Pizza".into(),
                    quantity: 2
                },
                CartLine {
                    name: "Salad".into(),
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn test_collapse_is_case_sensitive() {
        let lines = collapse_quantities(&["Churro", "churro"]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_recompute_reports_missing_names() {
        let mut catalog = HashMap::new();
        catalog.insert("Churro".to_string(), Item::new("Churro", 570, 6, 1.99));
        let lines = collapse_quantities(&["Churro", "Lobster"]);
        assert_eq!(
            recompute_totals(&lines, &catalog),
            Err(vec!["Lobster".to_string()])
        );
    }
}
