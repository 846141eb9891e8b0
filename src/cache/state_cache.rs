//! Thread-safe map of last-published record lists.

use crate::types::{CacheKey, EcosystemId, NotificationRecord, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Shared store of the last state published to each user.
///
/// A single reader/writer lock guards the whole map. It is held only for
/// the duration of one lookup or mutation.
pub struct StateCache {
    stats: RwLock<HashMap<CacheKey, Vec<NotificationRecord>>>,
}

impl StateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            stats: RwLock::new(HashMap::new()),
        }
    }

    /// Get the cached records for a user, if any.
    pub fn get(&self, ecosystem: EcosystemId, user: UserId) -> Option<Vec<NotificationRecord>> {
        self.stats
            .read()
            .get(&CacheKey::new(ecosystem, user))
            .cloned()
    }

    /// Replace the cached records for a user.
    pub fn set(&self, ecosystem: EcosystemId, user: UserId, records: Vec<NotificationRecord>) {
        self.stats
            .write()
            .insert(CacheKey::new(ecosystem, user), records);
    }

    /// Remove the cached records for a user. No-op if absent.
    pub fn delete(&self, ecosystem: EcosystemId, user: UserId) {
        self.stats.write().remove(&CacheKey::new(ecosystem, user));
    }

    /// Whether an entry exists for a user.
    pub fn contains(&self, ecosystem: EcosystemId, user: UserId) -> bool {
        self.stats
            .read()
            .contains_key(&CacheKey::new(ecosystem, user))
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.stats.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.read().is_empty()
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}
