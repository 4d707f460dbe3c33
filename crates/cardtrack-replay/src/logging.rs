use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{Level, event};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Where structured events land for a run.
pub fn telemetry_path(outputs: &ResolvedOutputs) -> PathBuf {
    outputs.telemetry_dir().join(TELEMETRY_FILE)
}

fn filter_for(logging: &LoggingConfig) -> EnvFilter {
    let level = logging.level().unwrap_or(Level::INFO);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Route tracker and replay events to `telemetry.jsonl` as JSON lines.
/// Does nothing unless `logging.enable_structured` is set; `RUST_LOG`
/// takes precedence over `logging.tracing_level`.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let path = telemetry_path(outputs);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("creating telemetry file at {}", path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter_for(logging))
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // Tests may run several replays in one process; the first subscriber wins.
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        event!(
            target: "cardtrack_replay::logging",
            Level::DEBUG,
            path = %path.display(),
            "telemetry started"
        );
    }

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path: path,
    }))
}
