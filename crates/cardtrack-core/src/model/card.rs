use crate::model::kind::CardKind;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque identity of a card object in the host.
///
/// Two cards with the same kind are still distinct references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardRef(pub u64);

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One card as read from the host during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: CardRef,
    pub kind: i32,
    pub active: bool,
}

impl CardSnapshot {
    pub const fn new(id: u64, kind: i32, active: bool) -> Self {
        Self {
            id: CardRef(id),
            kind,
            active,
        }
    }

    pub const fn card_kind(&self) -> CardKind {
        CardKind::from_code(self.kind)
    }
}
