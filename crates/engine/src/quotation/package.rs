//! Package-type options for offline quotations.
//!
//! Offline shipments pick a package type whose declared weight ceiling
//! covers the estimated total weight. The weight constraint prunes the
//! candidate list dynamically as the weight input changes; an option below
//! the current estimate is not offered at all.

use rust_decimal::Decimal;

use crosscart_core::PackageTypeId;

/// A selectable package type with its weight ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOption {
    pub id: PackageTypeId,
    pub label: String,
    /// Maximum total weight this package type carries, in kilograms.
    pub max_weight_kg: Decimal,
}

/// Options whose ceiling covers the given total weight estimate.
#[must_use]
pub fn selectable_options(
    options: &[PackageOption],
    total_weight_kg: Decimal,
) -> Vec<&PackageOption> {
    options
        .iter()
        .filter(|option| option.max_weight_kg >= total_weight_kg)
        .collect()
}

/// Options selectable for a raw weight input.
///
/// Unparseable input counts as zero weight, leaving every option
/// selectable until the staff member types a usable number.
#[must_use]
pub fn selectable_for_input<'a>(
    options: &'a [PackageOption],
    weight_text: &str,
) -> Vec<&'a PackageOption> {
    selectable_options(options, parse_weight(weight_text))
}

/// Parse a weight input, treating unparseable text as zero.
#[must_use]
pub fn parse_weight(text: &str) -> Decimal {
    text.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ceilings: &[i64]) -> Vec<PackageOption> {
        ceilings
            .iter()
            .enumerate()
            .map(|(i, ceiling)| PackageOption {
                id: PackageTypeId::new(i as i64 + 1),
                label: format!("Box up to {ceiling}kg"),
                max_weight_kg: Decimal::from(*ceiling),
            })
            .collect()
    }

    #[test]
    fn test_weight_prunes_option_list() {
        let opts = options(&[5, 20, 30]);
        let selectable = selectable_options(&opts, Decimal::from(25));
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].max_weight_kg, Decimal::from(30));
    }

    #[test]
    fn test_ceiling_equal_to_weight_is_selectable() {
        let opts = options(&[5, 20, 30]);
        let selectable = selectable_options(&opts, Decimal::from(20));
        assert_eq!(selectable.len(), 2);
    }

    #[test]
    fn test_no_option_below_current_weight_ever_selectable() {
        let opts = options(&[5, 20, 30]);
        for weight in 0..40 {
            let weight = Decimal::from(weight);
            assert!(
                selectable_options(&opts, weight)
                    .iter()
                    .all(|o| o.max_weight_kg >= weight)
            );
        }
    }

    #[test]
    fn test_unparseable_weight_counts_as_zero() {
        let opts = options(&[5, 20, 30]);
        assert_eq!(selectable_for_input(&opts, "abc").len(), 3);
        assert_eq!(selectable_for_input(&opts, "").len(), 3);
        assert_eq!(selectable_for_input(&opts, " 25 ").len(), 1);
    }
}
