use crate::model::kind::CardKind;
use crate::tracking::clock::Tick;
use serde::{Deserialize, Serialize};

/// Shown when a player's card collection could not be read at all.
pub const NO_CARDS: &str = "No Cards";

const NAME_SEPARATOR: &str = ", ";
const HISTORY_SEPARATOR: &str = " | ";

/// Display line for one player after a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub cards: String,
    pub seat: i32,
    #[serde(default)]
    pub local: bool,
}

/// A history group reduced to its live members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedGroup {
    /// Latest tick at which a live member went inactive.
    pub recency: Tick,
    pub kinds: Vec<CardKind>,
}

/// Render active cards followed by history groups, oldest group first.
pub fn format_cards(active: &[CardKind], mut groups: Vec<RankedGroup>) -> String {
    // Stable: equal recency keeps creation order.
    groups.sort_by_key(|group| group.recency);

    let active_text = join_kinds(active);
    let history_text = groups
        .iter()
        .filter(|group| !group.kinds.is_empty())
        .map(|group| format!("[{}]", join_kinds(&group.kinds)))
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR);

    if history_text.is_empty() {
        active_text
    } else if active_text.is_empty() {
        // No leading separator: a fully played hand reads "[Queen, King]".
        history_text
    } else {
        format!("{active_text}{HISTORY_SEPARATOR}{history_text}")
    }
}

fn join_kinds(kinds: &[CardKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}
