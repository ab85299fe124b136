use analytics::ScorecardEngine;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{load_config, LogFormat};
use std::path::PathBuf;

mod logging;
mod render;
mod snapshot;

/// The main entry point for the scorecard application.
fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only carries SCORECARD__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let format = cli.log_format.unwrap_or(config.logging.format);
    let _guard = logging::init(&config.logging, format)?;

    let engine = ScorecardEngine::try_new(config.thresholds.clone(), config.keywords.clone())?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(&engine, args),
        Commands::Perspectives(args) => handle_perspectives(&engine, args),
        Commands::Trends(args) => handle_trends(&engine, args),
        Commands::Resolve(args) => handle_resolve(&engine, args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Derives KPI status and rolls a balanced scorecard up to its perspectives.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults to ./scorecard.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the console log format from the configuration.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a snapshot and print the full scorecard report.
    Report(ReportArgs),
    /// Show per-perspective counts, shares and the balance verdict.
    Perspectives(SnapshotArgs),
    /// Show the trend of every KPI with historical readings.
    Trends(SnapshotArgs),
    /// Resolve a free-text label to one of the snapshot's perspectives.
    Resolve(ResolveArgs),
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
struct SnapshotArgs {
    /// JSON snapshot with perspectives, objectives, kpis, initiatives and historicalRecords.
    snapshot: PathBuf,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    input: SnapshotArgs,

    /// How to print the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser)]
struct ResolveArgs {
    #[command(flatten)]
    input: SnapshotArgs,

    /// The label to resolve, e.g. "clientes" or "Financial".
    label: String,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_report(engine: &ScorecardEngine, args: ReportArgs) -> anyhow::Result<()> {
    let dataset = snapshot::load_snapshot(&args.input.snapshot)?;
    let report = engine.evaluate(&dataset);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            println!("{}", render::kpi_table(&report.kpis));
            println!("{}", render::perspective_table(&report.perspectives));
            println!("{}", render::balance_table(&report.balance));
            println!("{}", render::distribution_table(&report));
            if !report.trends.is_empty() {
                println!("{}", render::trend_table(&report.trends));
            }
            if !report.unresolved_kpis.is_empty() {
                println!("Unresolved KPIs: {:?}", report.unresolved_kpis);
            }
        }
    }
    Ok(())
}

fn handle_perspectives(engine: &ScorecardEngine, args: SnapshotArgs) -> anyhow::Result<()> {
    let dataset = snapshot::load_snapshot(&args.snapshot)?;
    let report = engine.evaluate(&dataset);

    println!("{}", render::perspective_table(&report.perspectives));
    println!("{}", render::balance_table(&report.balance));
    Ok(())
}

fn handle_trends(engine: &ScorecardEngine, args: SnapshotArgs) -> anyhow::Result<()> {
    let dataset = snapshot::load_snapshot(&args.snapshot)?;
    let report = engine.evaluate(&dataset);

    if report.trends.is_empty() {
        tracing::info!("Snapshot has no historical readings");
        return Ok(());
    }
    println!("{}", render::trend_table(&report.trends));
    Ok(())
}

fn handle_resolve(engine: &ScorecardEngine, args: ResolveArgs) -> anyhow::Result<()> {
    let dataset = snapshot::load_snapshot(&args.input.snapshot)?;
    let resolver = engine.resolver(&dataset);
    let id = resolver.resolve_label(&args.label);

    println!(
        "{}",
        render::resolution_line(&args.label, id, &dataset.perspectives)
    );
    Ok(())
}
