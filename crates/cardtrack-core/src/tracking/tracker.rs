//! Per-poll card tracking across every player at the table.

use crate::model::player::PlayerSnapshot;
use crate::model::table::{TableHost, TableSnapshot};
use crate::tracking::board::SummaryBoard;
use crate::tracking::clock::{Tick, TickClock};
use crate::tracking::lifecycle::Roster;
use crate::tracking::state::PlayerState;
use crate::tracking::summary::{NO_CARDS, PlayerSummary, format_cards};
use crate::tracking::transition::Transition;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, Default)]
struct PassCounts {
    players: usize,
    became_inactive: usize,
    became_active: usize,
    groups_created: usize,
    groups_dropped: usize,
}

#[derive(Debug)]
pub struct CardTracker {
    clock: TickClock,
    players: HashMap<String, PlayerState>,
    summaries: Arc<[PlayerSummary]>,
    board: SummaryBoard,
}

impl Default for CardTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CardTracker {
    pub fn new() -> Self {
        Self {
            clock: TickClock::new(),
            players: HashMap::new(),
            summaries: Arc::from(Vec::new()),
            board: SummaryBoard::new(),
        }
    }

    /// Tick of the last completed poll.
    pub fn tick(&self) -> Tick {
        self.clock.current()
    }

    /// Run one full tracking pass over `table`. Unreadable players and cards
    /// are skipped; players missing from `table` lose all tracked state.
    pub fn poll(&mut self, table: &TableSnapshot) {
        let tick = self.clock.advance();
        let mut roster = Roster::new();
        let mut counts = PassCounts::default();
        let mut summaries = Vec::with_capacity(table.players.len());

        for player in table.readable_players() {
            let name = player.display_name();
            if !roster.observe(&name) {
                tracing::warn!(
                    target: "cardtrack_core::tracker",
                    tick = tick.value(),
                    player = %name,
                    "duplicate player name in snapshot, skipping"
                );
                continue;
            }

            let state = self.players.entry(name.clone()).or_default();
            let cards = track_player(state, player, tick, &mut counts);
            counts.players += 1;

            summaries.push(PlayerSummary {
                name,
                cards,
                seat: player.seat,
                local: player.local,
            });
        }

        summaries.sort_by_key(|summary| summary.seat);

        let purged = roster.purge_absent(&mut self.players);
        for name in &purged {
            event!(
                target: "cardtrack_core::lifecycle",
                Level::DEBUG,
                tick = tick.value(),
                player = %name,
                "purged player state"
            );
        }

        debug_assert!(self.players.values().all(PlayerState::is_consistent));

        self.summaries = Arc::from(summaries);
        self.board.publish(tick, Arc::clone(&self.summaries));

        event!(
            target: "cardtrack_core::tracker",
            Level::DEBUG,
            tick = tick.value(),
            players = counts.players,
            purged = purged.len(),
            became_inactive = counts.became_inactive,
            became_active = counts.became_active,
            groups_created = counts.groups_created,
            groups_dropped = counts.groups_dropped,
        );
    }

    pub fn poll_host<H: TableHost + ?Sized>(&mut self, host: &H) {
        self.poll(&host.snapshot());
    }

    /// Summaries of the last completed poll, ordered by seat.
    pub fn summaries(&self) -> &[PlayerSummary] {
        &self.summaries
    }

    pub fn summary(&self, name: &str) -> Option<&PlayerSummary> {
        self.summaries.iter().find(|summary| summary.name == name)
    }

    /// Rewrite the kind code of every card the host can reach from `player`.
    ///
    /// Tracking state is untouched; the next poll reads the new kinds.
    pub fn force_reclassify<H: TableHost + ?Sized>(
        &self,
        host: &mut H,
        player: &str,
        kind: i32,
    ) -> usize {
        let Some(cards) = host.card_refs(player) else {
            event!(
                target: "cardtrack_core::tracker",
                Level::DEBUG,
                tick = self.tick().value(),
                player,
                "no readable cards to reclassify"
            );
            return 0;
        };

        let rewritten = cards
            .into_iter()
            .filter(|&card| host.set_card_kind(card, kind))
            .count();

        event!(
            target: "cardtrack_core::tracker",
            Level::INFO,
            tick = self.tick().value(),
            player,
            kind,
            rewritten,
            "forced card kind"
        );
        rewritten
    }

    /// Clear the play history of players from the last poll matching
    /// `predicate`. Returns how many players were cleared.
    pub fn clear_history<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&PlayerSummary) -> bool,
    {
        let mut cleared = 0;
        for summary in self.summaries.iter() {
            if !predicate(summary) {
                continue;
            }
            if let Some(state) = self.players.get_mut(&summary.name) {
                let groups = state.clear_history();
                cleared += 1;
                event!(
                    target: "cardtrack_core::tracker",
                    Level::INFO,
                    tick = self.clock.current().value(),
                    player = %summary.name,
                    groups,
                    "cleared play history"
                );
            }
        }
        cleared
    }

    /// Clear the local viewer's own play history.
    pub fn clear_local_history(&mut self) -> usize {
        self.clear_history(|summary| summary.local)
    }

    /// Shared read handle updated at the end of every poll.
    pub fn board(&self) -> SummaryBoard {
        self.board.clone()
    }

    pub fn player(&self, name: &str) -> Option<&PlayerState> {
        self.players.get(name)
    }

    pub fn tracked_players(&self) -> usize {
        self.players.len()
    }
}

fn track_player(
    state: &mut PlayerState,
    player: &PlayerSnapshot,
    tick: Tick,
    counts: &mut PassCounts,
) -> String {
    state.begin_cycle();

    let Some(cards) = player.cards.as_ref() else {
        return NO_CARDS.to_string();
    };

    let mut active = Vec::with_capacity(cards.len());
    for card in cards.iter().flatten() {
        match state.observe_card(card, tick) {
            Transition::BecameInactive => counts.became_inactive += 1,
            Transition::BecameActive => counts.became_active += 1,
            Transition::FirstSeen | Transition::Unchanged => {}
        }
        if card.active {
            active.push(card.card_kind());
        }
    }

    let changes = state.settle_groups();
    if changes.created {
        counts.groups_created += 1;
    }
    counts.groups_dropped += changes.dropped;

    format_cards(&active, state.ranked_groups())
}
