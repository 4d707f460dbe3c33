use crate::tracking::arena::CardHandle;
use crate::tracking::clock::Tick;
use std::collections::HashMap;

/// Cards that went inactive together, oldest group first.
#[derive(Debug, Clone, Default)]
pub struct PlayGroups {
    groups: Vec<Vec<CardHandle>>,
}

/// Group history changes made during one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupChanges {
    pub created: bool,
    pub dropped: usize,
}

impl PlayGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull reactivated cards out of history and forget when they went inactive.
    ///
    /// Groups emptied by a removal are dropped. Cards that are in no group, or
    /// listed more than once, are tolerated.
    pub fn reconcile(
        &mut self,
        reactivated: &[CardHandle],
        inactive_since: &mut HashMap<CardHandle, Tick>,
    ) -> usize {
        let mut dropped = 0;
        for handle in reactivated {
            let before = self.groups.len();
            self.groups.retain_mut(|group| {
                let members = group.len();
                group.retain(|member| member != handle);
                !(group.len() != members && group.is_empty())
            });
            dropped += before - self.groups.len();
            inactive_since.remove(handle);
        }
        dropped
    }

    /// Append this cycle's newly inactive cards as one group, in discovery order.
    pub fn record(&mut self, newly_inactive: &[CardHandle]) -> bool {
        if newly_inactive.is_empty() {
            return false;
        }
        self.groups.push(newly_inactive.to_vec());
        true
    }

    pub fn clear(&mut self) -> usize {
        let cleared = self.groups.len();
        self.groups.clear();
        cleared
    }

    pub fn iter(&self) -> impl Iterator<Item = &[CardHandle]> {
        self.groups.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::PlayGroups;
    use crate::model::card::CardRef;
    use crate::tracking::arena::{CardArena, CardHandle};
    use crate::tracking::clock::Tick;
    use std::collections::HashMap;

    fn handles(count: u64) -> Vec<CardHandle> {
        let mut arena = CardArena::new();
        (0..count)
            .map(|id| arena.intern(CardRef(id), 1))
            .collect()
    }

    #[test]
    fn record_ignores_empty_cycles() {
        let mut groups = PlayGroups::new();
        assert!(!groups.record(&[]));
        assert!(groups.is_empty());
    }

    #[test]
    fn sole_member_reactivation_drops_group() {
        let h = handles(1);
        let mut groups = PlayGroups::new();
        let mut since = HashMap::from([(h[0], Tick(2))]);
        groups.record(&h);

        assert_eq!(groups.reconcile(&h, &mut since), 1);
        assert!(groups.is_empty());
        assert!(since.is_empty());
    }

    #[test]
    fn partial_reactivation_shrinks_group() {
        let h = handles(3);
        let mut groups = PlayGroups::new();
        let mut since: HashMap<_, _> = h.iter().map(|&handle| (handle, Tick(2))).collect();
        groups.record(&h);

        assert_eq!(groups.reconcile(&[h[1]], &mut since), 0);
        let remaining: Vec<_> = groups.iter().map(<[CardHandle]>::to_vec).collect();
        assert_eq!(remaining, vec![vec![h[0], h[2]]]);
        assert!(!since.contains_key(&h[1]));
    }

    #[test]
    fn duplicate_and_unknown_reactivations_are_noops() {
        let h = handles(3);
        let mut groups = PlayGroups::new();
        let mut since = HashMap::from([(h[0], Tick(2)), (h[1], Tick(2))]);
        groups.record(&h[..2]);

        let dropped = groups.reconcile(&[h[0], h[0], h[2]], &mut since);
        assert_eq!(dropped, 0);
        assert_eq!(groups.len(), 1);
        assert_eq!(since.len(), 1);
    }

    #[test]
    fn later_cycles_never_merge_into_old_groups() {
        let h = handles(3);
        let mut groups = PlayGroups::new();
        groups.record(&h[..1]);
        groups.record(&h[1..]);
        let recorded: Vec<_> = groups.iter().map(<[CardHandle]>::to_vec).collect();
        assert_eq!(recorded, vec![vec![h[0]], vec![h[1], h[2]]]);
        assert_eq!(groups.clear(), 2);
    }
}
