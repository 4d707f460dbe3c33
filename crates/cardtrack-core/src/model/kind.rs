use core::fmt;
use serde::{Deserialize, Serialize};

/// Category of a card as reported by the host's integer kind code.
///
/// The table is closed: every code outside `1..=4` is a `Special` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    King,
    Queen,
    Ace,
    Joker,
    Special,
}

impl CardKind {
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => CardKind::King,
            2 => CardKind::Queen,
            3 => CardKind::Ace,
            4 => CardKind::Joker,
            _ => CardKind::Special,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CardKind::King => "King",
            CardKind::Queen => "Queen",
            CardKind::Ace => "Ace",
            CardKind::Joker => "Joker",
            CardKind::Special => "Special",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::CardKind;

    #[test]
    fn from_code_maps_named_kinds() {
        assert_eq!(CardKind::from_code(1), CardKind::King);
        assert_eq!(CardKind::from_code(4), CardKind::Joker);
    }

    #[test]
    fn unknown_codes_fall_back_to_special() {
        for code in [0, 5, -1, i32::MAX, i32::MIN] {
            assert_eq!(CardKind::from_code(code), CardKind::Special);
        }
        assert_eq!(CardKind::from_code(99).to_string(), "Special");
    }

    #[test]
    fn names_match_display() {
        let names: Vec<String> = (1..=4).map(|code| CardKind::from_code(code).to_string()).collect();
        assert_eq!(names, vec!["King", "Queen", "Ace", "Joker"]);
    }
}
