use crate::model::card::{CardRef, CardSnapshot};
use crate::tracking::arena::{CardArena, CardHandle};
use crate::tracking::clock::Tick;
use crate::tracking::groups::{GroupChanges, PlayGroups};
use crate::tracking::summary::RankedGroup;
use crate::tracking::transition::Transition;
use std::collections::{HashMap, HashSet};

/// Everything the tracker remembers about one player.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    arena: CardArena,
    last_status: HashMap<CardHandle, bool>,
    inactive_since: HashMap<CardHandle, Tick>,
    groups: PlayGroups,
    newly_inactive: Vec<CardHandle>,
    newly_active: Vec<CardHandle>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin_cycle(&mut self) {
        self.newly_inactive.clear();
        self.newly_active.clear();
    }

    /// Classify one card reading and apply its side effects.
    pub(crate) fn observe_card(&mut self, card: &CardSnapshot, tick: Tick) -> Transition {
        let handle = self.arena.intern(card.id, card.kind);
        let previous = self.last_status.insert(handle, card.active);
        let transition = Transition::classify(previous, card.active);
        match transition {
            Transition::BecameInactive => {
                self.inactive_since.entry(handle).or_insert(tick);
                self.newly_inactive.push(handle);
            }
            Transition::BecameActive => self.newly_active.push(handle),
            Transition::FirstSeen | Transition::Unchanged => {}
        }
        transition
    }

    /// Reconcile reactivated cards, then group this cycle's deactivations.
    pub(crate) fn settle_groups(&mut self) -> GroupChanges {
        let dropped = self
            .groups
            .reconcile(&self.newly_active, &mut self.inactive_since);

        // A card listed twice in one poll can deactivate and reactivate in the
        // same cycle; only cards still inactive join the new group, once.
        let inactive_since = &self.inactive_since;
        let mut grouped = HashSet::new();
        self.newly_inactive
            .retain(|handle| inactive_since.contains_key(handle) && grouped.insert(*handle));

        let created = self.groups.record(&self.newly_inactive);
        GroupChanges { created, dropped }
    }

    /// History groups reduced to members still in `inactive_since`, named by
    /// their last read kind. Cards the host stopped listing keep rendering.
    /// Groups with no such member are left out but kept.
    pub(crate) fn ranked_groups(&self) -> Vec<RankedGroup> {
        self.groups
            .iter()
            .filter_map(|group| {
                let mut recency = None;
                let mut kinds = Vec::with_capacity(group.len());
                for &handle in group {
                    let Some(&since) = self.inactive_since.get(&handle) else {
                        continue;
                    };
                    let Some(entry) = self.arena.entry(handle) else {
                        continue;
                    };
                    recency = recency.max(Some(since));
                    kinds.push(entry.kind());
                }
                recency.map(|recency| RankedGroup { recency, kinds })
            })
            .collect()
    }

    /// Forget the group history only; status and timestamps stay.
    pub fn clear_history(&mut self) -> usize {
        self.groups.clear()
    }

    pub fn tracked_cards(&self) -> usize {
        self.last_status.len()
    }

    pub fn last_status(&self, card: CardRef) -> Option<bool> {
        let handle = self.arena.handle_of(card)?;
        self.last_status.get(&handle).copied()
    }

    pub fn inactive_since(&self, card: CardRef) -> Option<Tick> {
        let handle = self.arena.handle_of(card)?;
        self.inactive_since.get(&handle).copied()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group history as host references, oldest group first.
    pub fn groups(&self) -> Vec<Vec<CardRef>> {
        self.groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .filter_map(|&handle| self.arena.entry(handle).map(|entry| entry.card()))
                    .collect()
            })
            .collect()
    }

    /// Whether the store's structural rules currently hold.
    pub fn is_consistent(&self) -> bool {
        let timestamps_inactive = self
            .inactive_since
            .keys()
            .all(|handle| self.last_status.get(handle) == Some(&false));

        let groups_live = self.groups.iter().all(|group| {
            !group.is_empty()
                && group
                    .iter()
                    .any(|handle| self.inactive_since.contains_key(handle))
        });

        let mut grouped = HashSet::new();
        let groups_disjoint = self
            .groups
            .iter()
            .flatten()
            .all(|&handle| grouped.insert(handle));

        timestamps_inactive && groups_live && groups_disjoint
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerState;
    use crate::model::card::{CardRef, CardSnapshot};
    use crate::model::kind::CardKind;
    use crate::tracking::clock::Tick;
    use crate::tracking::transition::Transition;

    fn cycle(state: &mut PlayerState, tick: u64, cards: &[CardSnapshot]) -> Vec<Transition> {
        state.begin_cycle();
        let transitions = cards
            .iter()
            .map(|card| state.observe_card(card, Tick(tick)))
            .collect();
        state.settle_groups();
        transitions
    }

    #[test]
    fn first_seen_inactive_card_has_no_footprint_beyond_status() {
        let mut state = PlayerState::new();
        let transitions = cycle(&mut state, 1, &[CardSnapshot::new(1, 3, false)]);
        assert_eq!(transitions, vec![Transition::FirstSeen]);
        assert_eq!(state.last_status(CardRef(1)), Some(false));
        assert_eq!(state.inactive_since(CardRef(1)), None);
        assert_eq!(state.group_count(), 0);
    }

    #[test]
    fn deactivation_records_tick_and_group() {
        let mut state = PlayerState::new();
        cycle(&mut state, 1, &[CardSnapshot::new(1, 1, true), CardSnapshot::new(2, 2, true)]);
        let transitions = cycle(
            &mut state,
            2,
            &[CardSnapshot::new(1, 1, false), CardSnapshot::new(2, 2, false)],
        );
        assert_eq!(
            transitions,
            vec![Transition::BecameInactive, Transition::BecameInactive]
        );
        assert_eq!(state.inactive_since(CardRef(2)), Some(Tick(2)));
        assert_eq!(state.groups(), vec![vec![CardRef(1), CardRef(2)]]);
        assert!(state.is_consistent());
    }

    #[test]
    fn reactivation_reconciles_before_new_group() {
        let mut state = PlayerState::new();
        cycle(&mut state, 1, &[CardSnapshot::new(1, 1, true), CardSnapshot::new(2, 2, true)]);
        cycle(&mut state, 2, &[CardSnapshot::new(1, 1, false), CardSnapshot::new(2, 2, true)]);
        cycle(&mut state, 3, &[CardSnapshot::new(1, 1, true), CardSnapshot::new(2, 2, false)]);

        assert_eq!(state.groups(), vec![vec![CardRef(2)]]);
        assert_eq!(state.inactive_since(CardRef(1)), None);
        assert_eq!(state.inactive_since(CardRef(2)), Some(Tick(3)));
        assert!(state.is_consistent());
    }

    #[test]
    fn unlisted_members_still_rank_under_last_kind() {
        let mut state = PlayerState::new();
        cycle(&mut state, 1, &[CardSnapshot::new(1, 1, true), CardSnapshot::new(2, 2, true)]);
        cycle(&mut state, 2, &[CardSnapshot::new(1, 1, false), CardSnapshot::new(2, 5, false)]);
        cycle(&mut state, 3, &[CardSnapshot::new(2, 2, false)]);

        let ranked = state.ranked_groups();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].recency, Tick(2));
        assert_eq!(ranked[0].kinds, vec![CardKind::King, CardKind::Queen]);

        cycle(&mut state, 4, &[]);
        assert_eq!(state.ranked_groups(), ranked);
        assert_eq!(state.group_count(), 1);
        assert_eq!(state.tracked_cards(), 2);
    }

    #[test]
    fn duplicate_listing_flipping_back_forms_no_group() {
        let mut state = PlayerState::new();
        cycle(&mut state, 1, &[CardSnapshot::new(1, 1, true)]);
        let transitions = cycle(
            &mut state,
            2,
            &[CardSnapshot::new(1, 1, false), CardSnapshot::new(1, 1, true)],
        );
        assert_eq!(
            transitions,
            vec![Transition::BecameInactive, Transition::BecameActive]
        );
        assert_eq!(state.group_count(), 0);
        assert_eq!(state.inactive_since(CardRef(1)), None);
        assert!(state.is_consistent());
    }

    #[test]
    fn clear_history_keeps_timestamps() {
        let mut state = PlayerState::new();
        cycle(&mut state, 1, &[CardSnapshot::new(1, 4, true)]);
        cycle(&mut state, 2, &[CardSnapshot::new(1, 4, false)]);
        assert_eq!(state.clear_history(), 1);
        assert_eq!(state.group_count(), 0);
        assert_eq!(state.inactive_since(CardRef(1)), Some(Tick(2)));
        assert_eq!(state.last_status(CardRef(1)), Some(false));
        assert!(state.is_consistent());
    }
}
