//! Source of raw per-role pending counts.

use crate::error::Result;
use crate::types::{EcosystemId, RawRow, RoleId, UserId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Produces pending-count rows for a set of users in one ecosystem.
///
/// Implementations report any failure as [`NotifyError::Fetch`]; the
/// cycle gives up on that ecosystem for the current pass.
///
/// [`NotifyError::Fetch`]: crate::error::NotifyError::Fetch
pub trait RoleCountFetcher: Send + Sync {
    fn fetch(&self, ecosystem: EcosystemId, users: &[UserId]) -> Result<Vec<RawRow>>;
}

/// In-process fetcher backed by a table of counts.
///
/// Rows are returned ordered by (user, role), with every column rendered
/// as text, matching what a SQL driver returning untyped rows yields.
pub struct InMemoryFetcher {
    counts: RwLock<HashMap<EcosystemId, BTreeMap<(UserId, RoleId), i64>>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self {
            counts: RwLock::new(HashMap::new()),
        }
    }

    /// Set the pending count of one role. A count of zero or less drops the row.
    pub fn set_count(&self, ecosystem: EcosystemId, user: UserId, role: RoleId, count: i64) {
        let mut counts = self.counts.write();
        let table = counts.entry(ecosystem).or_default();
        if count > 0 {
            table.insert((user, role), count);
        } else {
            table.remove(&(user, role));
        }
    }

    /// Drop every row of a user.
    pub fn clear_user(&self, ecosystem: EcosystemId, user: UserId) {
        if let Some(table) = self.counts.write().get_mut(&ecosystem) {
            table.retain(|(u, _), _| *u != user);
        }
    }
}

impl Default for InMemoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleCountFetcher for InMemoryFetcher {
    fn fetch(&self, ecosystem: EcosystemId, users: &[UserId]) -> Result<Vec<RawRow>> {
        let wanted: HashSet<UserId> = users.iter().copied().collect();
        let counts = self.counts.read();

        let rows = counts
            .get(&ecosystem)
            .map(|table| {
                table
                    .iter()
                    .filter(|((user, _), _)| wanted.contains(user))
                    .map(|((user, role), count)| {
                        RawRow::new(user.to_string(), role.to_string(), count.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(rows)
    }
}
