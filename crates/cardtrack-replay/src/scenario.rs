//! Scripted table used in place of a live game.
//!
//! A scenario declares the starting players and a list of steps. Steps that
//! change the table are applied by [`ScriptedTable::apply`]; polls and admin
//! actions are driven by the runner.

use cardtrack_core::model::card::{CardRef, CardSnapshot};
use cardtrack_core::model::player::PlayerSnapshot;
use cardtrack_core::model::table::{TableHost, TableSnapshot};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerSpec {
    pub name: String,
    pub seat: i32,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub cards: Vec<CardSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct CardSpec {
    pub id: u64,
    pub kind: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

fn default_poll_count() -> u32 {
    1
}

/// One scripted action. Players are named by their host name, without the
/// local suffix.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Poll {
        #[serde(default = "default_poll_count")]
        count: u32,
    },
    Play {
        player: String,
        cards: Vec<u64>,
    },
    TakeBack {
        player: String,
        cards: Vec<u64>,
    },
    Deal {
        player: String,
        cards: Vec<CardSpec>,
    },
    Reorder {
        player: String,
        cards: Vec<u64>,
    },
    Destroy {
        player: String,
        cards: Vec<u64>,
    },
    HideCards {
        player: String,
    },
    ShowCards {
        player: String,
    },
    Join(PlayerSpec),
    Leave {
        player: String,
    },
    Rename {
        player: String,
        to: String,
    },
    ForceKind {
        player: String,
        kind: i32,
    },
    ClearHistory {
        #[serde(default)]
        player: Option<String>,
    },
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScenarioError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        let scenario: Scenario =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| {
                ScenarioError::Parse {
                    source,
                    path: path.to_path_buf(),
                }
            })?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(yaml).map_err(|source| {
            ScenarioError::Parse {
                source,
                path: PathBuf::from("<inline>"),
            }
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the starting table and that at least one poll happens.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        ScriptedTable::from_players(&self.players)?;
        if self.poll_count() == 0 {
            return Err(ScenarioError::NoPolls);
        }
        Ok(())
    }

    pub fn poll_count(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Poll { count } => u64::from(*count),
                _ => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone)]
struct CardSlot {
    id: u64,
    kind: i32,
    active: bool,
    destroyed: bool,
}

impl From<CardSpec> for CardSlot {
    fn from(spec: CardSpec) -> Self {
        Self {
            id: spec.id,
            kind: spec.kind,
            active: spec.active,
            destroyed: false,
        }
    }
}

#[derive(Debug, Clone)]
struct SeatEntry {
    name: String,
    seat: i32,
    local: bool,
    hidden: bool,
    cards: Vec<CardSlot>,
}

impl SeatEntry {
    fn snapshot(&self) -> PlayerSnapshot {
        let cards = (!self.hidden).then(|| {
            self.cards
                .iter()
                .map(|slot| {
                    (!slot.destroyed).then(|| CardSnapshot::new(slot.id, slot.kind, slot.active))
                })
                .collect()
        });
        PlayerSnapshot {
            name: self.name.clone(),
            seat: self.seat,
            local: self.local,
            cards,
        }
    }

    fn slot_mut(&mut self, id: u64) -> Result<&mut CardSlot, ScenarioError> {
        let player = self.name.clone();
        self.cards
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or(ScenarioError::UnknownCard { player, card: id })
    }
}

/// In-memory host whose players and cards are driven by scenario steps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTable {
    seats: Vec<SeatEntry>,
}

impl ScriptedTable {
    pub fn from_players(players: &[PlayerSpec]) -> Result<Self, ScenarioError> {
        let mut table = Self::default();
        for player in players {
            table.join(player)?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Display name the tracker uses for a host player name.
    pub fn display_name(&self, player: &str) -> Result<String, ScenarioError> {
        self.seats
            .iter()
            .find(|entry| entry.name == player)
            .map(|entry| entry.snapshot().display_name())
            .ok_or_else(|| ScenarioError::UnknownPlayer(player.to_string()))
    }

    /// Apply a table-changing step. Polls and admin actions are no-ops here.
    pub fn apply(&mut self, step: &Step) -> Result<(), ScenarioError> {
        match step {
            Step::Poll { .. } | Step::ForceKind { .. } | Step::ClearHistory { .. } => Ok(()),
            Step::Play { player, cards } => self.set_active(player, cards, false),
            Step::TakeBack { player, cards } => self.set_active(player, cards, true),
            Step::Deal { player, cards } => self.deal(player, cards),
            Step::Reorder { player, cards } => self.reorder(player, cards),
            Step::Destroy { player, cards } => {
                let entry = self.entry_mut(player)?;
                for &id in cards {
                    entry.slot_mut(id)?.destroyed = true;
                }
                Ok(())
            }
            Step::HideCards { player } => {
                self.entry_mut(player)?.hidden = true;
                Ok(())
            }
            Step::ShowCards { player } => {
                self.entry_mut(player)?.hidden = false;
                Ok(())
            }
            Step::Join(spec) => self.join(spec),
            Step::Leave { player } => {
                let index = self.index_of(player)?;
                self.seats.remove(index);
                Ok(())
            }
            Step::Rename { player, to } => {
                if to.trim().is_empty() {
                    return Err(ScenarioError::InvalidName(to.clone()));
                }
                if player != to && self.seats.iter().any(|entry| &entry.name == to) {
                    return Err(ScenarioError::DuplicatePlayer(to.clone()));
                }
                self.entry_mut(player)?.name = to.clone();
                Ok(())
            }
        }
    }

    fn join(&mut self, spec: &PlayerSpec) -> Result<(), ScenarioError> {
        if spec.name.trim().is_empty() {
            return Err(ScenarioError::InvalidName(spec.name.clone()));
        }
        if self.seats.iter().any(|entry| entry.name == spec.name) {
            return Err(ScenarioError::DuplicatePlayer(spec.name.clone()));
        }
        self.check_card_ids(None, &spec.cards)?;
        self.seats.push(SeatEntry {
            name: spec.name.clone(),
            seat: spec.seat,
            local: spec.local,
            hidden: false,
            cards: spec.cards.iter().copied().map(CardSlot::from).collect(),
        });
        Ok(())
    }

    fn deal(&mut self, player: &str, cards: &[CardSpec]) -> Result<(), ScenarioError> {
        let index = self.index_of(player)?;
        self.check_card_ids(Some(index), cards)?;
        let entry = &mut self.seats[index];
        entry.hidden = false;
        entry.cards = cards.iter().copied().map(CardSlot::from).collect();
        Ok(())
    }

    fn set_active(&mut self, player: &str, cards: &[u64], active: bool) -> Result<(), ScenarioError> {
        let entry = self.entry_mut(player)?;
        for &id in cards {
            entry.slot_mut(id)?.active = active;
        }
        Ok(())
    }

    /// Move the listed cards to the front in the given order.
    fn reorder(&mut self, player: &str, cards: &[u64]) -> Result<(), ScenarioError> {
        let entry = self.entry_mut(player)?;
        let mut front = Vec::with_capacity(cards.len());
        for &id in cards {
            let position = entry
                .cards
                .iter()
                .position(|slot| slot.id == id)
                .ok_or_else(|| ScenarioError::UnknownCard {
                    player: player.to_string(),
                    card: id,
                })?;
            front.push(entry.cards.remove(position));
        }
        front.append(&mut entry.cards);
        entry.cards = front;
        Ok(())
    }

    /// Card ids must be unique across the table, `skip` excepted.
    fn check_card_ids(&self, skip: Option<usize>, cards: &[CardSpec]) -> Result<(), ScenarioError> {
        let mut seen: HashSet<u64> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != skip)
            .flat_map(|(_, entry)| entry.cards.iter().map(|slot| slot.id))
            .collect();
        for card in cards {
            if !seen.insert(card.id) {
                return Err(ScenarioError::DuplicateCard(card.id));
            }
        }
        Ok(())
    }

    fn index_of(&self, player: &str) -> Result<usize, ScenarioError> {
        self.seats
            .iter()
            .position(|entry| entry.name == player)
            .ok_or_else(|| ScenarioError::UnknownPlayer(player.to_string()))
    }

    fn entry_mut(&mut self, player: &str) -> Result<&mut SeatEntry, ScenarioError> {
        let index = self.index_of(player)?;
        Ok(&mut self.seats[index])
    }
}

impl TableHost for ScriptedTable {
    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::with_players(self.seats.iter().map(SeatEntry::snapshot))
    }

    fn card_refs(&self, player: &str) -> Option<Vec<CardRef>> {
        self.seats
            .iter()
            .map(SeatEntry::snapshot)
            .find(|snapshot| snapshot.display_name() == player)
            .and_then(|snapshot| snapshot.card_refs())
    }

    fn set_card_kind(&mut self, card: CardRef, kind: i32) -> bool {
        let slot = self
            .seats
            .iter_mut()
            .filter(|entry| !entry.hidden)
            .flat_map(|entry| entry.cards.iter_mut())
            .find(|slot| slot.id == card.0 && !slot.destroyed);
        match slot {
            Some(slot) => {
                slot.kind = kind;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse scenario {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("player '{0}' is already at the table")]
    DuplicatePlayer(String),
    #[error("invalid player name '{0}'")]
    InvalidName(String),
    #[error("player '{player}' has no card {card}")]
    UnknownCard { player: String, card: u64 },
    #[error("card id {0} is already dealt")]
    DuplicateCard(u64),
    #[error("scenario never polls the tracker")]
    NoPolls,
}
