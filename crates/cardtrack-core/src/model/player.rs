use crate::model::card::{CardRef, CardSnapshot};
use serde::{Deserialize, Serialize};

/// Appended to the local viewer's own player name.
pub const LOCAL_SUFFIX: &str = " (You)";

/// One player as read from the host during a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    /// Host network slot; the sort key for summaries.
    pub seat: i32,
    #[serde(default)]
    pub local: bool,
    /// `None` when the card collection could not be found. `None` entries are
    /// card references that could not be read this poll.
    #[serde(default)]
    pub cards: Option<Vec<Option<CardSnapshot>>>,
}

impl PlayerSnapshot {
    pub fn new(name: impl Into<String>, seat: i32) -> Self {
        Self {
            name: name.into(),
            seat,
            local: false,
            cards: Some(Vec::new()),
        }
    }

    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn with_cards(mut self, cards: impl IntoIterator<Item = CardSnapshot>) -> Self {
        self.cards = Some(cards.into_iter().map(Some).collect());
        self
    }

    pub fn without_cards(mut self) -> Self {
        self.cards = None;
        self
    }

    /// Identity used to track this player across polls.
    pub fn display_name(&self) -> String {
        if self.local {
            format!("{}{LOCAL_SUFFIX}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Readable cards, skipping references that could not be read.
    pub fn readable_cards(&self) -> impl Iterator<Item = &CardSnapshot> {
        self.cards.iter().flatten().flatten()
    }

    pub fn card_refs(&self) -> Option<Vec<CardRef>> {
        self.cards
            .as_ref()
            .map(|cards| cards.iter().flatten().map(|card| card.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerSnapshot;
    use crate::model::card::{CardRef, CardSnapshot};

    #[test]
    fn local_player_gets_suffix() {
        let player = PlayerSnapshot::new("Scarlet", 1).local(true);
        assert_eq!(player.display_name(), "Scarlet (You)");
        assert_eq!(PlayerSnapshot::new("Foxy", 2).display_name(), "Foxy");
    }

    #[test]
    fn unreadable_cards_are_skipped() {
        let mut player = PlayerSnapshot::new("Toar", 0)
            .with_cards([CardSnapshot::new(1, 1, true), CardSnapshot::new(2, 3, false)]);
        if let Some(cards) = player.cards.as_mut() {
            cards.insert(1, None);
        }
        let ids: Vec<_> = player.readable_cards().map(|card| card.id).collect();
        assert_eq!(ids, vec![CardRef(1), CardRef(2)]);
        assert_eq!(player.card_refs(), Some(vec![CardRef(1), CardRef(2)]));
    }

    #[test]
    fn missing_collection_has_no_refs() {
        let player = PlayerSnapshot::new("Bristle", 3).without_cards();
        assert_eq!(player.card_refs(), None);
        assert_eq!(player.readable_cards().count(), 0);
    }
}
