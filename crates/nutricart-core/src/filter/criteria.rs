use super::predicate::{CmpOp, Column, ItemQuery, SqlValue};
use crate::model::Item;

/// Optional numeric bounds narrowing a catalog search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub max_calories: Option<i64>,
    pub min_protein: Option<i64>,
    pub max_price: Option<i64>,
}

/// Parse one raw query-string value.
///
/// Absent, blank, or non-integer input yields `None` ("no constraint"),
/// never an error. Surrounding whitespace is ignored; partial numbers such
/// as `"12abc"` are rejected rather than truncated.
pub fn parse_criterion(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

impl FilterCriteria {
    pub fn from_raw(
        max_calories: Option<&str>,
        min_protein: Option<&str>,
        max_price: Option<&str>,
    ) -> Self {
        Self {
            max_calories: parse_criterion(max_calories),
            min_protein: parse_criterion(min_protein),
            max_price: parse_criterion(max_price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_calories.is_none() && self.min_protein.is_none() && self.max_price.is_none()
    }

    /// One predicate per present bound.
    pub fn to_query(&self) -> ItemQuery {
        let mut query = ItemQuery::new();
        if let Some(v) = self.max_calories {
            query = query.and(Column::Calories, CmpOp::Le, SqlValue::Integer(v));
        }
        if let Some(v) = self.min_protein {
            query = query.and(Column::Protein, CmpOp::Ge, SqlValue::Integer(v));
        }
        if let Some(v) = self.max_price {
            query = query.and(Column::Price, CmpOp::Le, SqlValue::Integer(v));
        }
        query
    }

    /// In-memory evaluation with the same semantics as the SQL predicate.
    pub fn matches(&self, item: &Item) -> bool {
        self.max_calories
            .map_or(true, |max| i64::from(item.calories) <= max)
            && self
                .min_protein
                .map_or(true, |min| i64::from(item.protein) >= min)
            && self.max_price.map_or(true, |max| item.price <= max as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criterion_is_explicit_about_garbage() {
        assert_eq!(parse_criterion(Some("500")), Some(500));
        assert_eq!(parse_criterion(Some(" 42 ")), Some(42));
        assert_eq!(parse_criterion(Some("-3")), Some(-3));
        assert_eq!(parse_criterion(Some("")), None);
        assert_eq!(parse_criterion(Some("abc")), None);
        assert_eq!(parse_criterion(Some("12abc")), None);
        assert_eq!(parse_criterion(Some("4.5")), None);
        assert_eq!(parse_criterion(None), None);
    }

    #[test]
    fn test_each_present_bound_contributes_one_predicate() {
        let all = FilterCriteria::from_raw(Some("800"), Some("20"), Some("5"));
        assert_eq!(all.to_query().predicates().len(), 3);

        let partial = FilterCriteria::from_raw(Some("800"), Some("lots"), None);
        assert_eq!(partial.to_query().predicates().len(), 1);

        assert!(FilterCriteria::default().to_query().predicates().is_empty());
    }

    #[test]
    fn test_matches_uses_inclusive_bounds() {
        let item = Item::new("Hot Dog", 550, 24, 1.50);
        let criteria = FilterCriteria {
            max_calories: Some(550),
            min_protein: Some(24),
            max_price: Some(2),
        };
        assert!(criteria.matches(&item));

        let too_strict = FilterCriteria {
            max_price: Some(1),
            ..criteria
        };
        assert!(!too_strict.matches(&item));
    }
}
