//! esdash CLI - Earned Schedule milestone metrics.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use esdash_core::{format_date, parse_date, MilestoneStatus, RiskLevel, Time};
use esdash_progress::{locate_milestones, EngineConfig, ScheduleMetricsEngine};
use esdash_storage::{JsonMilestoneSource, MilestoneSource};
use serde::Serialize;
use serde_json::json;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "esdash")]
#[command(about = "Earned Schedule metrics for project milestones", long_about = None)]
struct Cli {
    /// Milestone export (JSON array or {"milestones": [...]})
    #[arg(long, short, global = true, default_value = "milestones.json")]
    input: PathBuf,

    /// Status date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS); defaults to now
    #[arg(long, global = true, value_parser = parse_date_arg)]
    status_date: Option<Time>,

    /// Project start assumed for milestones without a baseline start
    #[arg(long, global = true, value_parser = parse_date_arg)]
    default_project_start: Option<Time>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List milestones in the input without scoring them
    Locate,
    /// Compute metrics and forecasts for every milestone
    Forecast,
    /// Compute metrics and print the dashboard payload
    Dashboard,
    /// Show a short text summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let source = JsonMilestoneSource::new(&cli.input);
    let milestones = source.load_milestones().await?;

    let mut config = EngineConfig::default();
    if let Some(start) = cli.default_project_start {
        config.default_project_start = start;
    }
    let engine = ScheduleMetricsEngine::new().with_config(config);
    let status_date = cli
        .status_date
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    match cli.command {
        Commands::Locate => {
            let rows = locate_milestones(&milestones);
            info!("Located {} milestones", rows.len());
            print_json(
                &json!({
                    "status": "success",
                    "message": format!("Found {} milestones in the current project", rows.len()),
                    "milestones": rows,
                }),
                cli.pretty,
            )?;
        }
        Commands::Forecast => {
            let forecasts = engine.calculate_forecasts(&milestones, status_date);
            print_json(
                &json!({
                    "status": "success",
                    "forecasts": forecasts,
                }),
                cli.pretty,
            )?;
        }
        Commands::Dashboard => {
            if milestones.is_empty() {
                print_json(
                    &json!({
                        "status": "error",
                        "message": "No milestone data available. Import milestones from the project first.",
                    }),
                    cli.pretty,
                )?;
                std::process::exit(1);
            }

            let scored = engine.calculate_forecasts(&milestones, status_date);
            let data = engine.prepare_dashboard_data(scored);
            print_json(&data, cli.pretty)?;
        }
        Commands::Status => {
            let scored = engine.calculate_forecasts(&milestones, status_date);
            let data = engine.prepare_dashboard_data(scored);
            let summary = &data.summary;

            println!("Schedule status as of {}", format_date(status_date));
            println!("  Milestones: {}", summary.total_milestones);
            println!("  Completed: {}", summary.completed);
            println!("  Behind schedule: {}", summary.behind_schedule);
            println!("  On schedule: {}", summary.on_schedule);
            println!("  Average SPI(t): {:.2}", summary.avg_spi_t);
            println!(
                "  Risk: {} high, {} medium, {} low",
                summary.high_risk, summary.medium_risk, summary.low_risk
            );

            for m in &data.milestones {
                println!(
                    "  {} | {} | {} | {}",
                    m.display_name(),
                    m.status.map(format_status).unwrap_or("-"),
                    m.risk.map(format_risk).unwrap_or("-"),
                    m.forecast_finish.as_deref().unwrap_or("no forecast"),
                );
                if let Some(err) = &m.error {
                    println!("    error: {}", err);
                }
            }
        }
    }

    Ok(())
}

fn parse_date_arg(s: &str) -> std::result::Result<Time, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn format_status(status: MilestoneStatus) -> &'static str {
    match status {
        MilestoneStatus::NoBaseline => "NO BASELINE",
        MilestoneStatus::NotStarted => "NOT STARTED",
        MilestoneStatus::InProgress => "IN PROGRESS",
        MilestoneStatus::Complete => "COMPLETE",
    }
}

fn format_risk(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::None => "-",
        RiskLevel::Low => "LOW",
        RiskLevel::Medium => "MEDIUM",
        RiskLevel::High => "HIGH",
    }
}
