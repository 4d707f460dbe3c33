use crate::tracking::summary::PlayerSummary;
use crate::tracking::tracker::CardTracker;
use serde::{Deserialize, Serialize};

/// Serializable record of one completed poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub tick: u64,
    pub players: Vec<PlayerSummary>,
}

impl TrackerSnapshot {
    pub fn capture(tracker: &CardTracker) -> Self {
        TrackerSnapshot {
            tick: tracker.tick().value(),
            players: tracker.summaries().to_vec(),
        }
    }

    pub fn to_json(tracker: &CardTracker) -> serde_json::Result<String> {
        let snapshot = Self::capture(tracker);
        serde_json::to_string_pretty(&snapshot)
    }

    /// Compact single-line form for JSONL streams.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerSnapshot;
    use crate::model::card::CardSnapshot;
    use crate::model::player::PlayerSnapshot;
    use crate::model::table::TableSnapshot;
    use crate::tracking::tracker::CardTracker;

    fn tracker() -> CardTracker {
        let mut tracker = CardTracker::new();
        tracker.poll(&TableSnapshot::with_players([PlayerSnapshot::new("Foxy", 1)
            .with_cards([CardSnapshot::new(1, 1, true), CardSnapshot::new(2, 4, true)])]));
        tracker
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = TrackerSnapshot::to_json(&tracker()).unwrap();
        assert!(json.contains("\"tick\": 1"));
        assert!(json.contains("\"cards\": \"King, Joker\""));
    }

    #[test]
    fn json_line_is_single_line() {
        let line = TrackerSnapshot::capture(&tracker()).to_json_line().unwrap();
        assert!(!line.contains('\n'));
        let parsed = TrackerSnapshot::from_json(&line).unwrap();
        assert_eq!(parsed.players[0].name, "Foxy");
    }

    #[test]
    fn from_json_defaults_missing_local_flag() {
        let legacy = r#"{
            "tick": 4,
            "players": [{ "name": "Toar", "cards": "No Cards", "seat": 2 }]
        }"#;
        let snapshot = TrackerSnapshot::from_json(legacy).unwrap();
        assert_eq!(snapshot.tick, 4);
        assert!(!snapshot.players[0].local);
    }
}
