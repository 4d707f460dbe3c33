//! The card tracking engine.
//!
//! One [`CardTracker::poll`] per host frame:
//! - `clock`: logical tick, advanced once per poll.
//! - `transition`: classifies each card reading against the previous one.
//! - `state` / `arena`: per-player status, timestamps and handles.
//! - `groups`: play history built from cards that went inactive together.
//! - `summary`: renders each player's display line.
//! - `lifecycle`: purges players that disappeared from the table.
//! - `board` / `export`: read sides for other threads and JSON consumers.

pub mod arena;
pub mod board;
pub mod clock;
pub mod export;
pub mod groups;
pub mod lifecycle;
pub mod state;
pub mod summary;
pub mod tracker;
pub mod transition;

pub use arena::{CardArena, CardHandle};
pub use board::SummaryBoard;
pub use clock::{Tick, TickClock};
pub use export::TrackerSnapshot;
pub use groups::{GroupChanges, PlayGroups};
pub use state::PlayerState;
pub use summary::{NO_CARDS, PlayerSummary, RankedGroup, format_cards};
pub use tracker::CardTracker;
pub use transition::Transition;
