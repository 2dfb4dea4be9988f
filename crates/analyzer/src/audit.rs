//! Leaf restriction and the uncool-cow complement.

use corral_core::{AccessMap, CowId, FolderId, Forest};
use std::collections::HashSet;

/// Ids of folders with no outgoing child edges, in first-mention order.
pub fn leaf_folders(forest: &Forest) -> Vec<FolderId> {
    forest
        .folders()
        .filter(|folder| folder.is_leaf())
        .map(|folder| folder.id)
        .collect()
}

/// Drops access-map entries for non-leaf folders.
pub fn restrict_to_leaves(access: &mut AccessMap, leaves: &[FolderId]) {
    let keep: HashSet<FolderId> = leaves.iter().copied().collect();
    access.retain(|id, _| keep.contains(id));
}

/// Cows in `0..total_cows` missing from at least one entry of the
/// (leaf-restricted) access map.
///
/// The accumulating set is a monotonic union: a cow flagged at one leaf
/// stays flagged even if a later leaf grants it access. Once every cow is
/// flagged, the remaining entries cannot change the result and the scan
/// stops early.
pub fn uncool_cows(access: &AccessMap, total_cows: u64) -> HashSet<CowId> {
    let mut uncool = HashSet::new();

    for cow_set in access.values() {
        for cow in 0..total_cows {
            if !cow_set.contains(&cow) {
                uncool.insert(cow);
            }
        }
        if uncool.len() as u64 == total_cows {
            break;
        }
    }

    uncool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagator::propagate_access;
    use corral_core::AccessPolicy;

    fn cow_set(cows: &[CowId]) -> HashSet<CowId> {
        cows.iter().copied().collect()
    }

    fn folder(forest: &mut Forest, id: FolderId, policy: AccessPolicy, cows: &[CowId]) {
        let f = forest.get_or_create(id);
        f.policy = policy;
        for &cow in cows {
            f.add_cow(cow);
        }
    }

    #[test]
    fn confidential_leaf_locks_out_parent_cows() {
        // Shared folder 1 {0, 1} -> confidential leaf 2 {2}.
        let mut forest = Forest::new();
        forest.set_total_cows(3);
        folder(&mut forest, 1, AccessPolicy::Shared, &[0, 1]);
        folder(&mut forest, 2, AccessPolicy::Confidential, &[2]);
        forest.add_edge(1, 2);

        let mut access = propagate_access(&forest);
        let leaves = leaf_folders(&forest);
        assert_eq!(leaves, vec![2]);

        restrict_to_leaves(&mut access, &leaves);
        assert_eq!(access.len(), 1);
        assert_eq!(access[&2], cow_set(&[2]));

        assert_eq!(uncool_cows(&access, 3), cow_set(&[0, 1]));
    }

    #[test]
    fn shared_leaf_inherits_and_unflags_parent_cows() {
        // Shared folder 1 {0} -> shared leaf 2 {} : leaf access is {0}.
        let mut forest = Forest::new();
        forest.set_total_cows(2);
        folder(&mut forest, 1, AccessPolicy::Shared, &[0]);
        folder(&mut forest, 2, AccessPolicy::Shared, &[]);
        forest.add_edge(1, 2);

        let mut access = propagate_access(&forest);
        let leaves = leaf_folders(&forest);
        restrict_to_leaves(&mut access, &leaves);

        assert_eq!(uncool_cows(&access, 2), cow_set(&[1]));
    }

    #[test]
    fn without_edges_every_folder_is_a_leaf() {
        let mut forest = Forest::new();
        forest.set_total_cows(3);
        folder(&mut forest, 1, AccessPolicy::Shared, &[0]);
        folder(&mut forest, 2, AccessPolicy::Confidential, &[1]);

        let mut access = propagate_access(&forest);
        let leaves = leaf_folders(&forest);
        assert_eq!(leaves, vec![1, 2]);

        restrict_to_leaves(&mut access, &leaves);
        // Cow 0 is missing from folder 2, cow 1 from folder 1, and cow 2
        // from both.
        assert_eq!(uncool_cows(&access, 3), cow_set(&[0, 1, 2]));
    }

    #[test]
    fn flagged_cow_is_never_unflagged() {
        // Leaf 1 lacks cow 1; leaf 2 grants it. The flag sticks.
        let mut access = AccessMap::new();
        access.insert(1, cow_set(&[0]));
        access.insert(2, cow_set(&[0, 1]));

        assert_eq!(uncool_cows(&access, 2), cow_set(&[1]));
    }

    #[test]
    fn zero_cows_yields_empty_set() {
        let mut access = AccessMap::new();
        access.insert(1, cow_set(&[]));
        assert!(uncool_cows(&access, 0).is_empty());
    }

    #[test]
    fn zero_leaves_yields_empty_set() {
        let mut forest = Forest::new();
        forest.set_total_cows(4);
        // 1 -> 2 -> 1 : a pure cycle has no leaf.
        forest.add_edge(1, 2);
        forest.add_edge(2, 1);

        let mut access = propagate_access(&forest);
        let leaves = leaf_folders(&forest);
        assert!(leaves.is_empty());

        restrict_to_leaves(&mut access, &leaves);
        assert!(access.is_empty());
        assert!(uncool_cows(&access, 4).is_empty());
    }

    #[test]
    fn restriction_drops_interior_folders() {
        let mut forest = Forest::new();
        folder(&mut forest, 1, AccessPolicy::Shared, &[0]);
        forest.add_edge(1, 2);
        forest.add_edge(1, 3);

        let mut access = propagate_access(&forest);
        assert_eq!(access.len(), 3);

        restrict_to_leaves(&mut access, &leaf_folders(&forest));
        assert_eq!(access.len(), 2);
        assert!(!access.contains_key(&1));
    }
}
