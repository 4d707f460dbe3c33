//! Player-scoped interning of host card references.
//!
//! Host references are only trusted to be stable while the card lives; the
//! tracker keys all of its per-player maps by the handle issued here the first
//! time a reference is observed.

use crate::model::card::CardRef;
use crate::model::kind::CardKind;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardHandle(usize);

#[derive(Debug, Clone)]
pub struct CardEntry {
    card: CardRef,
    kind: i32,
}

impl CardEntry {
    pub fn card(&self) -> CardRef {
        self.card
    }

    pub fn kind(&self) -> CardKind {
        CardKind::from_code(self.kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardArena {
    index: HashMap<CardRef, CardHandle>,
    entries: Vec<CardEntry>,
}

impl CardArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading of `card`, issuing a handle on first sight. The
    /// entry keeps the last kind read, so a card the host stops listing
    /// still renders under its final kind.
    pub fn intern(&mut self, card: CardRef, kind: i32) -> CardHandle {
        if let Some(&handle) = self.index.get(&card) {
            self.entries[handle.0].kind = kind;
            return handle;
        }

        let handle = CardHandle(self.entries.len());
        self.entries.push(CardEntry { card, kind });
        self.index.insert(card, handle);
        handle
    }

    pub fn handle_of(&self, card: CardRef) -> Option<CardHandle> {
        self.index.get(&card).copied()
    }

    pub fn entry(&self, handle: CardHandle) -> Option<&CardEntry> {
        self.entries.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
