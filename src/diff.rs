//! Change detection between two record lists of the same user.

use crate::types::NotificationRecord;

/// Whether `new` differs from the previously published `old`.
///
/// Any difference in length counts as a change. Otherwise every role in
/// `new` must exist in `old` with the same count. Role order is irrelevant.
pub fn stats_changed(old: &[NotificationRecord], new: &[NotificationRecord]) -> bool {
    if old.len() != new.len() {
        return true;
    }

    if new.is_empty() {
        return false;
    }

    for fresh in new {
        let mut seen = false;

        for prev in old.iter().filter(|prev| prev.role_id == fresh.role_id) {
            seen = true;
            if prev.records_count != fresh.records_count {
                return true;
            }
        }

        if !seen {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EcosystemId, RoleId};
    use proptest::prelude::*;

    fn rec(role: i64, count: i64) -> NotificationRecord {
        NotificationRecord::new(EcosystemId(1), RoleId(role), count)
    }

    #[test]
    fn test_both_empty() {
        assert!(!stats_changed(&[], &[]));
    }

    #[test]
    fn test_cardinality_change() {
        assert!(stats_changed(&[rec(1, 5)], &[]));
        assert!(stats_changed(&[], &[rec(1, 1)]));
        assert!(stats_changed(&[rec(1, 5)], &[rec(1, 5), rec(2, 1)]));
    }

    #[test]
    fn test_count_change() {
        assert!(stats_changed(&[rec(1, 5)], &[rec(1, 6)]));
    }

    #[test]
    fn test_role_swapped() {
        assert!(stats_changed(&[rec(1, 5)], &[rec(2, 5)]));
    }

    #[test]
    fn test_same_roles_reordered() {
        let old = [rec(1, 5), rec(2, 3), rec(3, 0)];
        let new = [rec(3, 0), rec(1, 5), rec(2, 3)];
        assert!(!stats_changed(&old, &new));
    }

    proptest! {
        #[test]
        fn prop_permutation_is_unchanged(
            counts in proptest::collection::vec(0i64..1000, 0..12),
            seed in any::<u64>(),
        ) {
            let old: Vec<_> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| rec(i as i64, *c))
                .collect();

            let mut new = old.clone();
            if !new.is_empty() {
                let len = new.len();
                new.rotate_left((seed % len as u64) as usize);
            }

            prop_assert!(!stats_changed(&old, &new));
        }

        #[test]
        fn prop_any_count_change_is_detected(
            counts in proptest::collection::vec(0i64..1000, 1..12),
            idx in any::<prop::sample::Index>(),
            delta in 1i64..50,
        ) {
            let old: Vec<_> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| rec(i as i64, *c))
                .collect();

            let mut new = old.clone();
            let i = idx.index(new.len());
            new[i].records_count += delta;

            prop_assert!(stats_changed(&old, &new));
        }
    }
}
