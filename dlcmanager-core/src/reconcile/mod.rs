/*
    reconcile - Merging entitlements into a player's unlock record

    The record behaves like a grow-only set: reconcile is a union, so it is
    idempotent, commutative in its entitlements, and never drops an unlock the
    player earned some other way. The only shrinking operation is reset.
*/

use crate::catalog::BlueprintId;
use std::collections::HashSet;

/// Result of applying a merge or reset to an unlock record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub updated: HashSet<BlueprintId>,
    /// `updated` differs from the record it was computed from
    pub changed: bool,
    /// Blueprints present in `updated` but not before
    pub added: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockReconciler;

impl UnlockReconciler {
    /// `existing ∪ entitlement`
    pub fn reconcile(existing: &HashSet<BlueprintId>, entitlement: &HashSet<BlueprintId>) -> Reconciliation {
        let mut updated = existing.clone();
        updated.reserve(entitlement.len());

        let mut added = 0;
        for id in entitlement {
            if updated.insert(*id) {
                added += 1;
            }
        }

        Reconciliation {
            updated,
            changed: added > 0,
            added,
        }
    }

    /// Replace the record with the empty set
    pub fn reset(existing: &HashSet<BlueprintId>) -> Reconciliation {
        Reconciliation {
            updated: HashSet::new(),
            changed: !existing.is_empty(),
            added: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ids;

    #[test]
    fn test_reconcile_into_empty_record() {
        let result = UnlockReconciler::reconcile(&HashSet::new(), &ids(&[101, 103]));
        assert_eq!(result.updated, ids(&[101, 103]));
        assert!(result.changed);
        assert_eq!(result.added, 2);
    }

    #[test]
    fn test_reconcile_partial_overlap_then_reapply() {
        let first = UnlockReconciler::reconcile(&ids(&[101]), &ids(&[101, 103]));
        assert_eq!(first.updated, ids(&[101, 103]));
        assert!(first.changed);
        assert_eq!(first.added, 1);

        let second = UnlockReconciler::reconcile(&first.updated, &ids(&[101, 103]));
        assert_eq!(second.updated, ids(&[101, 103]));
        assert!(!second.changed);
        assert_eq!(second.added, 0);
    }

    #[test]
    fn test_reconcile_keeps_unrelated_unlocks() {
        let result = UnlockReconciler::reconcile(&ids(&[1, 2, 3]), &ids(&[101]));
        assert_eq!(result.updated, ids(&[1, 2, 3, 101]));
    }

    #[test]
    fn test_empty_entitlement_is_a_no_op() {
        let result = UnlockReconciler::reconcile(&ids(&[7]), &HashSet::new());
        assert_eq!(result.updated, ids(&[7]));
        assert!(!result.changed);
    }

    #[test]
    fn test_reset() {
        let result = UnlockReconciler::reset(&ids(&[101, 103]));
        assert!(result.updated.is_empty());
        assert!(result.changed);

        let result = UnlockReconciler::reset(&HashSet::new());
        assert!(result.updated.is_empty());
        assert!(!result.changed);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_set() -> impl Strategy<Value = HashSet<BlueprintId>> {
        prop::collection::hash_set((0..200i32).prop_map(BlueprintId), 0..30)
    }

    proptest! {
        #[test]
        fn prop_reconcile_is_idempotent(existing in arb_set(), entitlement in arb_set()) {
            let once = UnlockReconciler::reconcile(&existing, &entitlement);
            let twice = UnlockReconciler::reconcile(&once.updated, &entitlement);
            prop_assert!(!twice.changed);
            prop_assert_eq!(twice.updated, once.updated);
        }

        #[test]
        fn prop_reconcile_never_removes(existing in arb_set(), entitlement in arb_set()) {
            let result = UnlockReconciler::reconcile(&existing, &entitlement);
            prop_assert!(result.updated.is_superset(&existing));
            prop_assert!(result.updated.is_superset(&entitlement));
        }

        #[test]
        fn prop_changed_matches_set_difference(existing in arb_set(), entitlement in arb_set()) {
            let result = UnlockReconciler::reconcile(&existing, &entitlement);
            prop_assert_eq!(result.changed, result.updated != existing);
            prop_assert_eq!(result.added, entitlement.difference(&existing).count());
        }

        #[test]
        fn prop_reset_law(existing in arb_set()) {
            let result = UnlockReconciler::reset(&existing);
            prop_assert!(result.updated.is_empty());
            prop_assert_eq!(result.changed, !existing.is_empty());
        }
    }
}
