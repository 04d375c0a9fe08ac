//! Merging backend-supplied default components into a template.
//!
//! Statutory components (Provident Fund, ESI, Professional Tax slabs) come
//! from settings feeds and are appended to whichever list does not already
//! carry a component of the same name. Matching is case-insensitive so a
//! user-entered "provident fund" suppresses the default "Provident Fund".

use tracing::debug;

use crate::models::{ComponentDefinition, SalaryComponent};

/// Appends `defaults` to `components`, skipping any default whose name is
/// already present (case-insensitive). Existing entries are never
/// modified; appended defaults keep the feed order.
pub fn merge_defaults(
    components: &mut Vec<SalaryComponent>,
    defaults: &[ComponentDefinition],
) {
    for def in defaults {
        if contains_name(components, &def.name) {
            debug!(name = %def.name, "default component already present, skipping");
            continue;
        }
        components.push(def.to_component());
    }
}

fn contains_name(
    components: &[SalaryComponent],
    name: &str,
) -> bool {
    components
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::CalculationKind;

    use super::*;

    fn pf_default() -> ComponentDefinition {
        ComponentDefinition {
            name: "Provident Fund".to_string(),
            kind: CalculationKind::PercentOfBasic,
            value: dec!(12),
            earning: false,
        }
    }

    fn pt_default() -> ComponentDefinition {
        ComponentDefinition {
            name: "Professional Tax".to_string(),
            kind: CalculationKind::Fixed,
            value: dec!(200),
            earning: false,
        }
    }

    #[test]
    fn appends_missing_defaults_in_feed_order() {
        let mut components = vec![SalaryComponent::fixed("Loan Recovery", dec!(1000))];

        merge_defaults(&mut components, &[pf_default(), pt_default()]);

        assert_eq!(components.len(), 3);
        assert_eq!(components[0].name, "Loan Recovery");
        assert_eq!(components[1].name, "Provident Fund");
        assert_eq!(components[2].name, "Professional Tax");
    }

    #[test]
    fn skips_defaults_already_present_by_name() {
        let mut components = vec![SalaryComponent::percent_of_basic("Provident Fund", dec!(10))];

        merge_defaults(&mut components, &[pf_default(), pt_default()]);

        assert_eq!(components.len(), 2);
        // The user's 10% PF entry is untouched.
        assert_eq!(components[0].value, dec!(10));
        assert_eq!(components[1].name, "Professional Tax");
    }

    #[test]
    fn name_matching_is_case_insensitive() {
        let mut components = vec![SalaryComponent::percent_of_basic("provident FUND", dec!(10))];

        merge_defaults(&mut components, &[pf_default()]);

        assert_eq!(components.len(), 1);
    }

    #[test]
    fn merge_into_empty_list_copies_all_defaults() {
        let mut components = Vec::new();

        merge_defaults(&mut components, &[pf_default(), pt_default()]);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].kind, CalculationKind::PercentOfBasic);
        assert_eq!(components[1].value, dec!(200));
    }

    #[test]
    fn empty_defaults_leave_list_unchanged() {
        let mut components = vec![SalaryComponent::fixed("Conveyance", dec!(1600))];

        merge_defaults(&mut components, &[]);

        assert_eq!(components.len(), 1);
    }
}
