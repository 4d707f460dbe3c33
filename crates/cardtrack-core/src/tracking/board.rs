//! Read side for consumers on other threads (an overlay, a logger).
//!
//! The tracker swaps in a complete pass at once; readers clone an `Arc` and
//! never see a pass in progress.

use crate::tracking::clock::Tick;
use crate::tracking::export::TrackerSnapshot;
use crate::tracking::summary::PlayerSummary;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
struct Published {
    tick: Tick,
    summaries: Arc<[PlayerSummary]>,
}

#[derive(Debug, Clone)]
pub struct SummaryBoard {
    inner: Arc<RwLock<Published>>,
}

impl Default for SummaryBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryBoard {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Published {
                tick: Tick::ZERO,
                summaries: Arc::from(Vec::new()),
            })),
        }
    }

    pub(crate) fn publish(&self, tick: Tick, summaries: Arc<[PlayerSummary]>) {
        let mut published = self.inner.write();
        published.tick = tick;
        published.summaries = summaries;
    }

    /// Summaries of the last completed pass.
    pub fn latest(&self) -> Arc<[PlayerSummary]> {
        Arc::clone(&self.inner.read().summaries)
    }

    pub fn tick(&self) -> Tick {
        self.inner.read().tick
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let published = self.inner.read();
        TrackerSnapshot {
            tick: published.tick.value(),
            players: published.summaries.to_vec(),
        }
    }
}
