#![deny(warnings)]
pub mod model;
pub mod tracking;

pub use model::card::{CardRef, CardSnapshot};
pub use model::kind::CardKind;
pub use model::player::{LOCAL_SUFFIX, PlayerSnapshot};
pub use model::table::{TableHost, TableSnapshot};
pub use tracking::{
    CardTracker, NO_CARDS, PlayerState, PlayerSummary, SummaryBoard, Tick, TrackerSnapshot,
    Transition,
};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "cardtrack"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "cardtrack");
        assert!(!AppInfo::version().is_empty());
    }
}
