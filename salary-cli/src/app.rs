use std::fmt;

use rust_decimal::Decimal;
use salary_core::calculations::common::round_half_up;
use salary_core::calculations::{TemplateBreakdown, merge_defaults};
use salary_core::db::RepositoryRegistry;
use salary_core::{
    CalculationKind, ComponentDefinition, Location, NewSalaryTemplate, PayrollRepository,
    PayrollSettings, PtSlab, RepositoryError, SalaryComponent,
};
use salary_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, error};

/// Registry with every backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Reference data a session works against.
#[derive(Debug, Default)]
pub struct Workspace {
    pub settings: PayrollSettings,
    pub defaults: Vec<ComponentDefinition>,
    pub pt_slab: Option<PtSlab>,
    pub locations: Vec<Location>,
}

/// Fetches all reference data for a session.
///
/// Each fetch degrades independently: a failed settings or defaults read
/// logs one error and leaves that part empty, so the form still opens with
/// whatever the backend could provide.
pub async fn load_workspace(repo: &dyn PayrollRepository) -> Workspace {
    let settings = match repo.get_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            error!("failed to load payroll settings: {e}");
            PayrollSettings::default()
        }
    };

    let defaults = match repo.list_default_components().await {
        Ok(defaults) => defaults,
        Err(e) => {
            error!("failed to load default components: {e}");
            Vec::new()
        }
    };

    let pt_slab = match repo.get_active_pt_slab().await {
        Ok(slab) => Some(slab),
        Err(RepositoryError::NotFound) => {
            debug!("no active professional tax slab configured");
            None
        }
        Err(e) => {
            error!("failed to load professional tax slab: {e}");
            None
        }
    };

    let locations = match repo.list_locations().await {
        Ok(locations) => locations,
        Err(e) => {
            error!("failed to load locations: {e}");
            Vec::new()
        }
    };

    Workspace {
        settings,
        defaults,
        pt_slab,
        locations,
    }
}

/// Assembles a fresh template from the settings feed: its component lists
/// become the starting lists, the statutory defaults are appended where
/// absent, and `annual_ctc` overrides the settings CTC when given.
///
/// The settings rates and the active slab take precedence over the stored
/// default values: PF/ESI defaults are re-valued from `pf_rate`/`esi_rate`,
/// and the Professional Tax deduction carries the slab amount.
pub fn template_from_settings(
    settings: &PayrollSettings,
    defaults: &[ComponentDefinition],
    pt_slab: Option<&PtSlab>,
    annual_ctc: Option<Decimal>,
) -> NewSalaryTemplate {
    let mut earnings = settings.earnings.clone();
    let mut deductions = settings.deductions.clone();

    let (earning_defaults, deduction_defaults): (Vec<_>, Vec<_>) = defaults
        .iter()
        .cloned()
        .map(|d| apply_settings_rate(d, settings))
        .partition(|d| d.earning);
    merge_defaults(&mut earnings, &earning_defaults);
    merge_defaults(&mut deductions, &deduction_defaults);

    if let Some(slab) = pt_slab {
        apply_pt_slab(&mut deductions, slab);
    }

    NewSalaryTemplate {
        template_name: String::new(),
        description: String::new(),
        annual_ctc: annual_ctc.unwrap_or(settings.annual_ctc),
        earnings,
        deductions,
        per_day_allowance: Decimal::ZERO,
        pg_rent: Decimal::ZERO,
    }
}

/// Re-values the PF/ESI defaults from the settings rates. A zero rate
/// means the settings carry no figure for it; the stored default stands.
fn apply_settings_rate(
    mut definition: ComponentDefinition,
    settings: &PayrollSettings,
) -> ComponentDefinition {
    if definition.name.eq_ignore_ascii_case("Provident Fund") && !settings.pf_rate.is_zero() {
        definition.value = settings.pf_rate;
    } else if definition.name.eq_ignore_ascii_case("ESI") && !settings.esi_rate.is_zero() {
        definition.value = settings.esi_rate;
    }
    definition
}

/// The active slab is the source of the Professional Tax amount. It
/// overrides whatever figure the seeded default carried, and supplies the
/// deduction outright when no default exists.
fn apply_pt_slab(
    deductions: &mut Vec<SalaryComponent>,
    slab: &PtSlab,
) {
    match deductions
        .iter_mut()
        .find(|c| c.name.eq_ignore_ascii_case("Professional Tax"))
    {
        Some(pt) => {
            pt.kind = CalculationKind::Fixed;
            pt.value = slab.amount;
        }
        None => deductions.push(SalaryComponent::fixed("Professional Tax", slab.amount)),
    }
}

/// Renders a computed breakdown as a text table. Amounts are rounded
/// half-up to two decimals for display only.
pub struct BreakdownDisplay<'a> {
    pub name: &'a str,
    pub breakdown: &'a TemplateBreakdown,
}

impl fmt::Display for BreakdownDisplay<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let b = self.breakdown;

        writeln!(f, "{} — monthly breakdown", self.name)?;

        for earning in [true, false] {
            let side = if earning { "Earnings" } else { "Deductions" };
            writeln!(f, "  {side}:")?;
            for line in b.lines.iter().filter(|l| l.earning == earning) {
                writeln!(
                    f,
                    "    {:<20} {:>12}  ({:>12} / yr)",
                    line.name,
                    round_half_up(line.monthly),
                    round_half_up(line.annual),
                )?;
            }
        }

        writeln!(
            f,
            "  Per-day allowance ({} days): {}",
            b.days_in_cycle,
            round_half_up(b.per_day_contribution)
        )?;
        writeln!(f, "  PG rent: {}", round_half_up(b.pg_rent_contribution))?;
        writeln!(
            f,
            "  Monthly earnings:   {:>12}",
            round_half_up(b.monthly_earnings)
        )?;
        writeln!(
            f,
            "  Monthly deductions: {:>12}",
            round_half_up(b.monthly_deductions)
        )?;
        writeln!(f, "  Monthly net:        {:>12}", round_half_up(b.monthly_net))?;
        write!(f, "  Annual net:         {:>12}", round_half_up(b.annual_net))
    }
}
