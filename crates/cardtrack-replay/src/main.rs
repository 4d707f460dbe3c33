use std::path::PathBuf;

use clap::Parser;

use cardtrack_replay::config::{ReplayConfig, ResolvedOutputs};
use cardtrack_replay::logging::init_logging;
use cardtrack_replay::runner::ReplayRunner;

/// Replays a scripted table through the card tracker.
#[derive(Debug, Parser)]
#[command(
    name = "cardtrack-replay",
    author,
    version,
    about = "Deterministic card tracker replay harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "replay/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the scenario file (relative to the working directory).
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Exit after validating the configuration and scenario.
    #[arg(long)]
    validate_only: bool,

    /// Skip printing the final summaries.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(scenario) = cli.scenario {
        config.scenario = scenario;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = ReplayRunner::new(config, outputs)?;

    let scenario = runner.scenario();
    let player_count = scenario.players.len();
    println!(
        "Loaded scenario for '{run_id}' with {player_count} player{} and {} step{}",
        if player_count == 1 { "" } else { "s" },
        scenario.steps.len(),
        if scenario.steps.len() == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} polls, {} rows at {}",
        summary.polls,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    if !cli.quiet {
        println!();
        for player in &summary.final_summaries {
            println!("{}", player.name);
            println!("  {}", player.cards);
        }
    }

    Ok(())
}
