//! Input validation applied before any store access.

use crate::errors::NutriCartError;
use crate::model::NutritionTotals;

/// A cart must contain at least one selection and no blank names.
pub fn validate_cart<S: AsRef<str>>(selections: &[S]) -> Result<(), NutriCartError> {
    if selections.is_empty() {
        return Err(NutriCartError::EmptyCart);
    }
    if let Some(position) = selections
        .iter()
        .position(|name| name.as_ref().trim().is_empty())
    {
        return Err(NutriCartError::BlankItemName { position });
    }
    Ok(())
}

/// Totals must be non-negative and the price finite.
///
/// Totals are trusted as supplied otherwise; they are not checked against
/// the catalog.
pub fn validate_totals(totals: &NutritionTotals) -> Result<(), NutriCartError> {
    let nutrition = [
        ("calories", totals.calories),
        ("protein", totals.protein),
        ("carbs", totals.carbs),
        ("fats", totals.fats),
        ("fiber", totals.fiber),
    ];
    if let Some((field, _)) = nutrition.iter().find(|(_, v)| *v < 0) {
        return Err(NutriCartError::InvalidTotals {
            reason: format!("{} must not be negative", field),
        });
    }
    if !totals.price.is_finite() || totals.price < 0.0 {
        return Err(NutriCartError::InvalidTotals {
            reason: "price must be a non-negative number".to_string(),
        });
    }
    Ok(())
}

/// Require a present, non-blank field and return it trimmed.
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, NutriCartError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(NutriCartError::MissingField {
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(validate_cart(&empty), Err(NutriCartError::EmptyCart));
    }

    #[test]
    fn test_blank_name_rejected_with_position() {
        assert_eq!(
            validate_cart(&["Churro", "  "]),
            Err(NutriCartError::BlankItemName { position: 1 })
        );
    }

    #[test]
    fn test_negative_totals_rejected() {
        let totals = NutritionTotals {
            fats: -1,
            ..Default::default()
        };
        assert!(validate_totals(&totals).is_err());

        let nan_price = NutritionTotals {
            price: f64::NAN,
            ..Default::default()
        };
        assert!(validate_totals(&nan_price).is_err());
    }

    #[test]
    fn test_require_field_trims() {
        assert_eq!(require_field("email", Some("  a@b.c ")), Ok("a@b.c"));
        assert_eq!(
            require_field("email", Some("   ")),
            Err(NutriCartError::MissingField {
                field: "email".into()
            })
        );
        assert!(require_field("email", None).is_err());
    }
}
