use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use lifeplan::{OutputFormat, init_logging, load_scenario, write_csv, write_json};
use lifeplan_core::simulation::{monte_carlo_simulate, needs_monte_carlo, simulate};

#[derive(Parser, Debug)]
#[command(name = "lifeplan")]
#[command(about = "A lifetime household financial simulator")]
struct Args {
    /// Path to the scenario JSON file
    scenario: PathBuf,

    /// Number of Monte Carlo trials (default: the scenario's setting)
    #[arg(short, long)]
    runs: Option<u32>,

    /// Master seed for the random number generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Output format for the per-year rows on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let scenario = load_scenario(&args.scenario)?;

    let rows = if needs_monte_carlo(&scenario.parameters) {
        let runs = args.runs.unwrap_or(scenario.parameters.monte_carlo_runs);
        tracing::info!(runs, seed = args.seed, "running Monte Carlo simulation");
        let result = monte_carlo_simulate(&scenario, runs, args.seed);
        tracing::info!(
            successes = result.successes,
            "{:.1}% of trials reached age {}",
            100.0 * result.success_rate(),
            scenario.parameters.target_age
        );
        result.rows
    } else {
        tracing::info!("running deterministic simulation");
        let result = simulate(&scenario, args.seed);
        if result.success {
            tracing::info!("plan reached age {}", scenario.parameters.target_age);
        } else {
            tracing::warn!("plan ran short at age {}", result.failed_at);
        }
        result.rows
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Csv => write_csv(&mut out, &rows)?,
        OutputFormat::Json => write_json(&mut out, &rows)?,
    }
    out.flush()?;

    Ok(())
}
