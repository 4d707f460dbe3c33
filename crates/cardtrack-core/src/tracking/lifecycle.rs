use crate::tracking::state::PlayerState;
use std::collections::{HashMap, HashSet};

/// Display names observed during the current poll.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    observed: HashSet<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the name was already observed this poll.
    pub fn observe(&mut self, name: &str) -> bool {
        if self.observed.contains(name) {
            return false;
        }
        self.observed.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Drop every tracked player that was not observed. Returns the purged
    /// names in sorted order.
    pub fn purge_absent(&self, players: &mut HashMap<String, PlayerState>) -> Vec<String> {
        let mut purged: Vec<String> = players
            .keys()
            .filter(|name| !self.observed.contains(name.as_str()))
            .cloned()
            .collect();
        purged.sort();
        for name in &purged {
            players.remove(name);
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::Roster;
    use crate::tracking::state::PlayerState;
    use std::collections::HashMap;

    #[test]
    fn duplicate_names_are_reported() {
        let mut roster = Roster::new();
        assert!(roster.observe("Foxy"));
        assert!(!roster.observe("Foxy"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn purge_removes_only_absent_players() {
        let mut players: HashMap<String, PlayerState> = ["Foxy", "Toar", "Bristle"]
            .into_iter()
            .map(|name| (name.to_string(), PlayerState::new()))
            .collect();
        let mut roster = Roster::new();
        roster.observe("Toar");

        let purged = roster.purge_absent(&mut players);
        assert_eq!(purged, vec!["Bristle".to_string(), "Foxy".to_string()]);
        assert_eq!(players.len(), 1);
        assert!(players.contains_key("Toar"));
    }

    #[test]
    fn empty_roster_purges_everything() {
        let mut players = HashMap::from([("Scarlet (You)".to_string(), PlayerState::new())]);
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.purge_absent(&mut players).len(), 1);
        assert!(players.is_empty());
    }
}
