//! Drives a scenario through the tracker and writes the run artifacts.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cardtrack_core::{CardTracker, PlayerSummary, TrackerSnapshot};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ReplayConfig, ResolvedOutputs};
use crate::logging::telemetry_path;
use crate::scenario::{Scenario, ScenarioError, ScriptedTable, Step};

/// Replays one scenario file against a fresh tracker.
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
    scenario: Scenario,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub polls: u64,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub final_summaries: Vec<PlayerSummary>,
}

impl ReplayRunner {
    /// Load the configured scenario and check its starting table.
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Result<Self, ReplayError> {
        let scenario = Scenario::from_path(&config.scenario)?;
        Ok(Self::with_scenario(config, outputs, scenario))
    }

    pub fn with_scenario(config: ReplayConfig, outputs: ResolvedOutputs, scenario: Scenario) -> Self {
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            scenario,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Execute every step, streaming one JSONL row per poll.
    pub fn run(&self) -> Result<RunSummary, ReplayError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut table = ScriptedTable::from_players(&self.scenario.players)?;
        let mut tracker = CardTracker::new();
        let mut rows_written = 0usize;

        for (index, step) in self.scenario.steps.iter().enumerate() {
            match step {
                Step::Poll { count } => {
                    for _ in 0..*count {
                        tracker.poll_host(&table);
                        let snapshot = TrackerSnapshot::capture(&tracker);
                        writeln!(writer, "{}", snapshot.to_json_line()?)?;
                        rows_written += 1;
                        self.log_poll(index, &snapshot);
                    }
                }
                Step::ForceKind { player, kind } => {
                    let display = table
                        .display_name(player)
                        .map_err(|source| ReplayError::Step { index, source })?;
                    tracker.force_reclassify(&mut table, &display, *kind);
                }
                Step::ClearHistory { player: None } => {
                    tracker.clear_local_history();
                }
                Step::ClearHistory {
                    player: Some(player),
                } => {
                    let display = table
                        .display_name(player)
                        .map_err(|source| ReplayError::Step { index, source })?;
                    tracker.clear_history(|summary| summary.name == display);
                }
                other => table
                    .apply(other)
                    .map_err(|source| ReplayError::Step { index, source })?,
            }
        }

        writer.flush()?;

        let final_summaries = tracker.summaries().to_vec();
        write_markdown(
            &self.outputs.summary_md,
            &self.config.run_id,
            tracker.tick().value(),
            &final_summaries,
        )?;

        let telemetry = self.logging_enabled.then(|| telemetry_path(&self.outputs));

        Ok(RunSummary {
            polls: tracker.tick().value(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path: telemetry,
            final_summaries,
        })
    }

    fn log_poll(&self, step: usize, snapshot: &TrackerSnapshot) {
        if !self.logging_enabled || !tracing::enabled!(Level::INFO) {
            return;
        }
        let no_cards = snapshot
            .players
            .iter()
            .filter(|player| player.cards == cardtrack_core::NO_CARDS)
            .count();
        event!(
            target: "cardtrack_replay::poll",
            Level::INFO,
            run_id = %self.config.run_id,
            step,
            tick = snapshot.tick,
            players = snapshot.players.len(),
            no_cards,
            "tracker polled"
        );
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), ReplayError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_markdown(
    path: &Path,
    run_id: &str,
    tick: u64,
    summaries: &[PlayerSummary],
) -> Result<(), ReplayError> {
    let mut rows = String::new();
    rows.push_str(&format!("# Card Tracker Replay: {run_id}\n\n"));
    rows.push_str(&format!("Final tick: {tick}\n\n"));
    rows.push_str("| Seat | Player | Cards |\n");
    rows.push_str("|------|--------|-------|\n");
    for summary in summaries {
        rows.push_str(&format!(
            "| {seat} | {name} | {cards} |\n",
            seat = summary.seat,
            name = escape_cell(&summary.name),
            cards = escape_cell(&summary.cards),
        ));
    }
    fs::write(path, rows)?;
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("{0}")]
    Scenario(#[from] ScenarioError),
    #[error("step {index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: ScenarioError,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}
