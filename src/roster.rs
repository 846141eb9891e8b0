//! Registry of the users to notify in each ecosystem.

use crate::types::{EcosystemId, UserId};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Append-only mapping of ecosystem to registered users.
///
/// Registration does not deduplicate: registering a user twice lists it
/// twice. There is no removal.
pub struct Roster {
    users: Mutex<BTreeMap<EcosystemId, Vec<UserId>>>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register a user for notifications in an ecosystem.
    pub fn register(&self, user: UserId, ecosystem: EcosystemId) {
        self.users.lock().entry(ecosystem).or_default().push(user);
    }

    /// Copy of the users registered in one ecosystem.
    pub fn users(&self, ecosystem: EcosystemId) -> Vec<UserId> {
        self.users
            .lock()
            .get(&ecosystem)
            .cloned()
            .unwrap_or_default()
    }

    /// Consistent copy of the whole roster, ordered by ecosystem.
    pub fn snapshot(&self) -> Vec<(EcosystemId, Vec<UserId>)> {
        self.users
            .lock()
            .iter()
            .map(|(ecosystem, users)| (*ecosystem, users.clone()))
            .collect()
    }

    /// Number of ecosystems with at least one registration.
    pub fn ecosystem_count(&self) -> usize {
        self.users.lock().len()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_appends() {
        let roster = Roster::new();
        roster.register(UserId(1), EcosystemId(1));
        roster.register(UserId(2), EcosystemId(1));
        roster.register(UserId(3), EcosystemId(2));

        assert_eq!(roster.users(EcosystemId(1)), vec![UserId(1), UserId(2)]);
        assert_eq!(roster.users(EcosystemId(2)), vec![UserId(3)]);
        assert!(roster.users(EcosystemId(3)).is_empty());
        assert_eq!(roster.ecosystem_count(), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let roster = Roster::new();
        roster.register(UserId(1), EcosystemId(1));
        roster.register(UserId(1), EcosystemId(1));

        assert_eq!(roster.users(EcosystemId(1)), vec![UserId(1), UserId(1)]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let roster = Roster::new();
        roster.register(UserId(1), EcosystemId(2));
        roster.register(UserId(9), EcosystemId(1));

        let snapshot = roster.snapshot();
        roster.register(UserId(2), EcosystemId(2));

        assert_eq!(
            snapshot,
            vec![
                (EcosystemId(1), vec![UserId(9)]),
                (EcosystemId(2), vec![UserId(1)]),
            ]
        );
        assert_eq!(roster.users(EcosystemId(2)).len(), 2);
    }
}
