/// What happened to a card between two consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    FirstSeen,
    BecameInactive,
    BecameActive,
    Unchanged,
}

impl Transition {
    pub const fn classify(previous: Option<bool>, current: bool) -> Self {
        match (previous, current) {
            (None, _) => Transition::FirstSeen,
            (Some(true), false) => Transition::BecameInactive,
            (Some(false), true) => Transition::BecameActive,
            (Some(_), _) => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Transition;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn classify_covers_every_pair() {
        assert_eq!(Transition::classify(None, true), Transition::FirstSeen);
        assert_eq!(Transition::classify(None, false), Transition::FirstSeen);
        assert_eq!(
            Transition::classify(Some(true), false),
            Transition::BecameInactive
        );
        assert_eq!(
            Transition::classify(Some(false), true),
            Transition::BecameActive
        );
        assert_eq!(Transition::classify(Some(true), true), Transition::Unchanged);
        assert_eq!(
            Transition::classify(Some(false), false),
            Transition::Unchanged
        );
    }

    #[test]
    fn transitions_match_edges_in_random_sequences() {
        let mut rng = StdRng::seed_from_u64(20251017);
        for _ in 0..200 {
            let len = rng.gen_range(1..64);
            let flags: Vec<bool> = (0..len).map(|_| rng.gen_bool(0.5)).collect();

            let falling = flags.windows(2).filter(|w| w[0] && !w[1]).count();
            let rising = flags.windows(2).filter(|w| !w[0] && w[1]).count();

            let mut previous = None;
            let mut inactive = 0;
            let mut active = 0;
            for &flag in &flags {
                match Transition::classify(previous, flag) {
                    Transition::BecameInactive => inactive += 1,
                    Transition::BecameActive => active += 1,
                    _ => {}
                }
                previous = Some(flag);
            }

            assert_eq!(inactive, falling, "flags: {flags:?}");
            assert_eq!(active, rising, "flags: {flags:?}");
        }
    }
}
