use crate::model::card::{CardRef, CardSnapshot};
use crate::model::player::PlayerSnapshot;
use serde::{Deserialize, Serialize};

/// Capability a host exposes to the tracker.
///
/// Implementations decide how players and cards are enumerated; the tracker
/// only sees the resulting snapshot.
pub trait TableHost {
    /// Players currently live in the host.
    fn snapshot(&self) -> TableSnapshot;

    /// Card references reachable from the player with this display name, or
    /// `None` when the player or its collection cannot be read.
    fn card_refs(&self, player: &str) -> Option<Vec<CardRef>>;

    /// Overwrite a card's kind code. Returns `false` for unreadable cards.
    fn set_card_kind(&mut self, card: CardRef, kind: i32) -> bool;
}

/// Everything the host exposes for a single poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// `None` entries are player references that could not be read.
    pub players: Vec<Option<PlayerSnapshot>>,
}

impl TableSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: impl IntoIterator<Item = PlayerSnapshot>) -> Self {
        Self {
            players: players.into_iter().map(Some).collect(),
        }
    }

    pub fn push(&mut self, player: PlayerSnapshot) {
        self.players.push(Some(player));
    }

    pub fn readable_players(&self) -> impl Iterator<Item = &PlayerSnapshot> {
        self.players.iter().flatten()
    }

    pub fn player(&self, display_name: &str) -> Option<&PlayerSnapshot> {
        self.readable_players()
            .find(|player| player.display_name() == display_name)
    }

    pub fn player_mut(&mut self, display_name: &str) -> Option<&mut PlayerSnapshot> {
        self.players
            .iter_mut()
            .flatten()
            .find(|player| player.display_name() == display_name)
    }

    fn card_mut(&mut self, card: CardRef) -> Option<&mut CardSnapshot> {
        self.players
            .iter_mut()
            .flatten()
            .filter_map(|player| player.cards.as_mut())
            .flat_map(|cards| cards.iter_mut().flatten())
            .find(|snapshot| snapshot.id == card)
    }
}

impl TableHost for TableSnapshot {
    fn snapshot(&self) -> TableSnapshot {
        self.clone()
    }

    fn card_refs(&self, player: &str) -> Option<Vec<CardRef>> {
        self.player(player).and_then(PlayerSnapshot::card_refs)
    }

    fn set_card_kind(&mut self, card: CardRef, kind: i32) -> bool {
        match self.card_mut(card) {
            Some(snapshot) => {
                snapshot.kind = kind;
                true
            }
            None => false,
        }
    }
}
