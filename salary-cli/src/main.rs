use chrono::{Local, NaiveDate};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use salary_cli::app;
use salary_core::TemplateCalculator;
use salary_core::db::DbConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Salary template calculator.
///
/// Connects to the configured database, assembles a template from the
/// payroll settings and statutory defaults, and prints its monthly
/// breakdown.
#[derive(Debug, Parser)]
struct Cli {
    /// Database backend to use.
    #[arg(long, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `payroll.db`) or `:memory:`.
    #[arg(long, default_value = "payroll.db")]
    db: String,

    /// Annual CTC to calculate against. Defaults to the CTC from the
    /// payroll settings.
    #[arg(long)]
    ctc: Option<Decimal>,

    /// Calculation date (YYYY-MM-DD) driving the pay-cycle day count.
    /// Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let db_config = DbConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };

    debug!("connecting to {} backend", db_config.backend);
    let registry = app::build_registry();
    let repo = registry.create(&db_config).await?;

    let workspace = app::load_workspace(&*repo).await;
    let template = app::template_from_settings(
        &workspace.settings,
        &workspace.defaults,
        workspace.pt_slab.as_ref(),
        cli.ctc,
    );

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let calc = TemplateCalculator::new();
    let breakdown = calc.breakdown_parts(
        template.annual_ctc,
        &template.earnings,
        &template.deductions,
        template.per_day_allowance,
        template.pg_rent,
        today,
    );

    let rendered = app::BreakdownDisplay {
        name: "Settings template",
        breakdown: &breakdown,
    };
    info!("{}", rendered);

    Ok(())
}
