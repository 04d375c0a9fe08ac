//! Salary template calculations.
//!
//! Converts each component's calculation kind into monthly and annual
//! amounts and aggregates earning/deduction totals into a net figure.
//!
//! # Amount derivation
//!
//! | Kind             | Monthly amount                                  |
//! |------------------|-------------------------------------------------|
//! | `Fixed`          | `value` (already monthly)                       |
//! | `PercentOfCtc`   | `annual_ctc × value / 100 / 12`                 |
//! | `PercentOfBasic` | `annual_ctc × basic_share × value / 100 / 12`   |
//!
//! Annual amounts are always `monthly × 12`, so `annual / 12 == monthly`
//! holds for every kind by construction. The Basic share of CTC defaults
//! to 40% but is carried as calculator configuration, not a literal
//! buried in the formula.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use salary_core::calculations::TemplateCalculator;
//! use salary_core::models::SalaryComponent;
//!
//! let calc = TemplateCalculator::new();
//! let basic = SalaryComponent::percent_of_ctc("Basic", dec!(40));
//!
//! assert_eq!(calc.monthly_amount(&basic, dec!(600000)), dec!(20000));
//! assert_eq!(calc.annual_amount(&basic, dec!(600000)), dec!(240000));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::pay_cycle::days_in_cycle;
use crate::models::{CalculationKind, SalaryComponent, SalaryTemplate};

const MONTHS_PER_YEAR: u32 = 12;
const PERCENT_DIVISOR: u32 = 100;

/// Per-component amounts as they appear in a breakdown and on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAmounts {
    pub name: String,
    pub kind: CalculationKind,
    pub value: Decimal,
    pub monthly: Decimal,
    pub annual: Decimal,
    pub earning: bool,
}

/// Fully evaluated template: per-line amounts plus the aggregated totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBreakdown {
    pub lines: Vec<ComponentAmounts>,
    /// Pay-cycle day count used for the per-day allowance contribution.
    pub days_in_cycle: u32,
    /// `per_day_allowance × days_in_cycle`.
    pub per_day_contribution: Decimal,
    /// Flat monthly PG rent contribution.
    pub pg_rent_contribution: Decimal,
    /// Component earnings plus both allowance contributions, monthly.
    pub monthly_earnings: Decimal,
    pub monthly_deductions: Decimal,
    pub monthly_net: Decimal,
    pub annual_net: Decimal,
}

/// Calculator for salary templates.
///
/// Stateless apart from the Basic-share configuration; all amounts are
/// exact `Decimal` arithmetic with no intermediate rounding.
#[derive(Debug, Clone)]
pub struct TemplateCalculator {
    basic_share_of_ctc: Decimal,
}

impl TemplateCalculator {
    /// Calculator with the conventional 40% Basic share of annual CTC.
    pub fn new() -> Self {
        Self {
            basic_share_of_ctc: Self::default_basic_share(),
        }
    }

    /// Calculator with an explicit Basic share (as a fraction, e.g. `0.40`).
    pub fn with_basic_share(share: Decimal) -> Self {
        Self {
            basic_share_of_ctc: share,
        }
    }

    /// The conventional Basic share of annual CTC: 40%.
    ///
    /// This is a business assumption inherited from the payroll settings
    /// screen, not a statutory figure.
    pub fn default_basic_share() -> Decimal {
        Decimal::new(40, 2)
    }

    pub fn basic_share_of_ctc(&self) -> Decimal {
        self.basic_share_of_ctc
    }

    /// Monthly amount of a single component against `annual_ctc`.
    pub fn monthly_amount(
        &self,
        component: &SalaryComponent,
        annual_ctc: Decimal,
    ) -> Decimal {
        let months = Decimal::from(MONTHS_PER_YEAR);
        let percent = Decimal::from(PERCENT_DIVISOR);

        match component.kind {
            CalculationKind::Fixed => component.value,
            CalculationKind::PercentOfCtc => annual_ctc * component.value / percent / months,
            CalculationKind::PercentOfBasic => {
                annual_ctc * self.basic_share_of_ctc * component.value / percent / months
            }
        }
    }

    /// Annual amount: exactly `monthly_amount × 12`.
    pub fn annual_amount(
        &self,
        component: &SalaryComponent,
        annual_ctc: Decimal,
    ) -> Decimal {
        self.monthly_amount(component, annual_ctc) * Decimal::from(MONTHS_PER_YEAR)
    }

    /// Sum of monthly amounts over a component list.
    pub fn total_monthly(
        &self,
        components: &[SalaryComponent],
        annual_ctc: Decimal,
    ) -> Decimal {
        components
            .iter()
            .map(|c| self.monthly_amount(c, annual_ctc))
            .sum()
    }

    /// Monthly contribution of the two allowance overrides: per-day
    /// allowance scaled by the pay-cycle day count for `today`, PG rent flat.
    pub fn allowance_contribution(
        &self,
        per_day_allowance: Decimal,
        pg_rent: Decimal,
        today: NaiveDate,
    ) -> (Decimal, Decimal) {
        let days = Decimal::from(days_in_cycle(today));
        (per_day_allowance * days, pg_rent)
    }

    /// Evaluates a whole template as of `today`.
    ///
    /// `today` only influences the per-day allowance contribution; the
    /// pay-cycle count is recomputed on every call rather than stored.
    pub fn breakdown(
        &self,
        template: &SalaryTemplate,
        today: NaiveDate,
    ) -> TemplateBreakdown {
        self.breakdown_parts(
            template.annual_ctc,
            &template.earnings,
            &template.deductions,
            template.per_day_allowance,
            template.pg_rent,
            today,
        )
    }

    pub fn breakdown_parts(
        &self,
        annual_ctc: Decimal,
        earnings: &[SalaryComponent],
        deductions: &[SalaryComponent],
        per_day_allowance: Decimal,
        pg_rent: Decimal,
        today: NaiveDate,
    ) -> TemplateBreakdown {
        let line = |c: &SalaryComponent, earning: bool| {
            let monthly = self.monthly_amount(c, annual_ctc);
            ComponentAmounts {
                name: c.name.clone(),
                kind: c.kind,
                value: c.value,
                monthly,
                annual: monthly * Decimal::from(MONTHS_PER_YEAR),
                earning,
            }
        };

        let mut lines: Vec<ComponentAmounts> =
            earnings.iter().map(|c| line(c, true)).collect();
        lines.extend(deductions.iter().map(|c| line(c, false)));

        let days = days_in_cycle(today);
        let (per_day_contribution, pg_rent_contribution) =
            self.allowance_contribution(per_day_allowance, pg_rent, today);

        let monthly_earnings = self.total_monthly(earnings, annual_ctc)
            + per_day_contribution
            + pg_rent_contribution;
        let monthly_deductions = self.total_monthly(deductions, annual_ctc);
        let monthly_net = monthly_earnings - monthly_deductions;

        TemplateBreakdown {
            lines,
            days_in_cycle: days,
            per_day_contribution,
            pg_rent_contribution,
            monthly_earnings,
            monthly_deductions,
            monthly_net,
            annual_net: monthly_net * Decimal::from(MONTHS_PER_YEAR),
        }
    }
}

impl Default for TemplateCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn march_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    fn template() -> SalaryTemplate {
        SalaryTemplate {
            id: 1,
            template_name: "Standard".to_string(),
            description: "Default template".to_string(),
            annual_ctc: dec!(600000),
            earnings: vec![
                SalaryComponent::percent_of_ctc("Basic", dec!(40)),
                SalaryComponent::percent_of_basic("HRA", dec!(50)),
                SalaryComponent::fixed("Conveyance", dec!(1600)),
            ],
            deductions: vec![SalaryComponent::fixed("Professional Tax", dec!(200))],
            per_day_allowance: dec!(0),
            pg_rent: dec!(0),
        }
    }

    // =========================================================================
    // monthly_amount / annual_amount
    // =========================================================================

    #[test]
    fn fixed_component_is_monthly_amount_unchanged() {
        let calc = TemplateCalculator::new();
        let c = SalaryComponent::fixed("Conveyance", dec!(1600));

        assert_eq!(calc.monthly_amount(&c, dec!(600000)), dec!(1600));
        // Independent of CTC entirely.
        assert_eq!(calc.monthly_amount(&c, dec!(0)), dec!(1600));
        assert_eq!(calc.monthly_amount(&c, dec!(9999999)), dec!(1600));
    }

    #[test]
    fn percent_of_ctc_is_ctc_times_pct_over_1200() {
        let calc = TemplateCalculator::new();
        let basic = SalaryComponent::percent_of_ctc("Basic", dec!(40));

        // 600000 * 40 / 1200 = 20000
        assert_eq!(calc.monthly_amount(&basic, dec!(600000)), dec!(20000));
        assert_eq!(calc.annual_amount(&basic, dec!(600000)), dec!(240000));
    }

    #[test]
    fn percent_of_basic_applies_basic_share_first() {
        let calc = TemplateCalculator::new();
        let hra = SalaryComponent::percent_of_basic("HRA", dec!(50));

        // Basic = 600000 * 0.40 = 240000; HRA = 240000 * 50 / 1200 = 10000
        assert_eq!(calc.monthly_amount(&hra, dec!(600000)), dec!(10000));
    }

    #[test]
    fn basic_share_is_overridable() {
        let calc = TemplateCalculator::with_basic_share(dec!(0.50));
        let hra = SalaryComponent::percent_of_basic("HRA", dec!(50));

        // Basic = 600000 * 0.50 = 300000; HRA = 300000 * 50 / 1200 = 12500
        assert_eq!(calc.monthly_amount(&hra, dec!(600000)), dec!(12500));
        assert_eq!(calc.basic_share_of_ctc(), dec!(0.50));
    }

    #[test]
    fn default_basic_share_is_40_percent() {
        assert_eq!(TemplateCalculator::default_basic_share(), dec!(0.40));
        assert_eq!(
            TemplateCalculator::new().basic_share_of_ctc(),
            dec!(0.40)
        );
    }

    #[test]
    fn annual_is_exactly_twelve_times_monthly_for_every_kind() {
        let calc = TemplateCalculator::new();
        let ctc = dec!(734517.83);
        let components = [
            SalaryComponent::fixed("Conveyance", dec!(1600)),
            SalaryComponent::percent_of_ctc("Basic", dec!(38.5)),
            SalaryComponent::percent_of_basic("HRA", dec!(47.3)),
        ];

        for c in &components {
            let monthly = calc.monthly_amount(c, ctc);
            let annual = calc.annual_amount(c, ctc);
            assert_eq!(annual, monthly * dec!(12), "kind {:?}", c.kind);
            assert_eq!(annual / dec!(12), monthly, "kind {:?}", c.kind);
        }
    }

    #[test]
    fn fixed_deduction_scenario() {
        let calc = TemplateCalculator::new();
        let pt = SalaryComponent::fixed("Professional Tax", dec!(200));

        assert_eq!(calc.monthly_amount(&pt, dec!(600000)), dec!(200));
        assert_eq!(calc.annual_amount(&pt, dec!(600000)), dec!(2400));
    }

    // =========================================================================
    // aggregation
    // =========================================================================

    #[test]
    fn total_monthly_sums_component_amounts() {
        let calc = TemplateCalculator::new();
        let t = template();

        // Basic 20000 + HRA 10000 + Conveyance 1600
        assert_eq!(calc.total_monthly(&t.earnings, t.annual_ctc), dec!(31600));
        assert_eq!(calc.total_monthly(&t.deductions, t.annual_ctc), dec!(200));
    }

    #[test]
    fn total_monthly_of_empty_list_is_zero() {
        let calc = TemplateCalculator::new();
        assert_eq!(calc.total_monthly(&[], dec!(600000)), dec!(0));
    }

    #[test]
    fn net_is_earnings_minus_deductions_exactly() {
        let calc = TemplateCalculator::new();
        let b = calc.breakdown(&template(), march_5());

        assert_eq!(b.monthly_net, b.monthly_earnings - b.monthly_deductions);
        assert_eq!(b.monthly_net, dec!(31400));
        assert_eq!(b.annual_net, dec!(376800));
    }

    #[test]
    fn breakdown_lines_keep_earnings_first() {
        let calc = TemplateCalculator::new();
        let b = calc.breakdown(&template(), march_5());

        assert_eq!(b.lines.len(), 4);
        assert!(b.lines[..3].iter().all(|l| l.earning));
        assert!(!b.lines[3].earning);
        assert_eq!(b.lines[0].name, "Basic");
        assert_eq!(b.lines[0].monthly, dec!(20000));
        assert_eq!(b.lines[0].annual, dec!(240000));
    }

    // =========================================================================
    // allowances
    // =========================================================================

    #[test]
    fn per_day_allowance_scales_with_pay_cycle_days() {
        let calc = TemplateCalculator::new();
        let mut t = template();
        t.per_day_allowance = dec!(100);

        // March 5, non-leap year: 27-day cycle.
        let b = calc.breakdown(&t, march_5());

        assert_eq!(b.days_in_cycle, 27);
        assert_eq!(b.per_day_contribution, dec!(2700));
        assert_eq!(b.monthly_earnings, dec!(31600) + dec!(2700));
    }

    #[test]
    fn pg_rent_is_flat_and_never_day_scaled() {
        let calc = TemplateCalculator::new();
        let mut t = template();
        t.pg_rent = dec!(5000);

        let short_cycle = calc.breakdown(&t, march_5());
        let long_cycle =
            calc.breakdown(&t, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());

        assert_eq!(short_cycle.pg_rent_contribution, dec!(5000));
        assert_eq!(long_cycle.pg_rent_contribution, dec!(5000));
    }

    #[test]
    fn allowance_contribution_changes_with_evaluation_date() {
        let calc = TemplateCalculator::new();
        let mut t = template();
        t.per_day_allowance = dec!(100);

        let feb = calc.breakdown(&t, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        let mar = calc.breakdown(&t, march_5());

        // Jan has 31 days (30-day cycle); Feb has 28 (27-day cycle).
        assert_eq!(feb.per_day_contribution, dec!(3000));
        assert_eq!(mar.per_day_contribution, dec!(2700));
    }
}
