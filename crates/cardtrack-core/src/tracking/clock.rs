use core::fmt;
use serde::{Deserialize, Serialize};

/// Logical poll counter. Tick 0 means "before the first poll".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TickClock {
    current: Tick,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new poll and return its tick.
    pub fn advance(&mut self) -> Tick {
        self.current = Tick(self.current.0.saturating_add(1));
        self.current
    }

    pub fn current(&self) -> Tick {
        self.current
    }
}
