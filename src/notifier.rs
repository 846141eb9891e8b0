//! Cycle driver tying fetcher, cache, roster and publisher together.

use crate::aggregate::aggregate;
use crate::cache::StateCache;
use crate::diff::stats_changed;
use crate::error::{NotifyError, Result};
use crate::fetch::RoleCountFetcher;
use crate::publish::{send_user_stats, Publisher};
use crate::roster::Roster;
use crate::types::{EcosystemId, NotificationRecord, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Notifier configuration.
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    /// Publish the zeroed list when a user's notifications drop to none.
    /// When false the cache entry is still removed but subscribers hear nothing.
    pub publish_all_clear: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            publish_all_clear: true,
        }
    }
}

/// Counters describing what one cycle did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Ecosystems processed (including failed ones).
    pub ecosystems: usize,
    /// Ecosystems whose fetch or aggregation failed.
    pub failed_ecosystems: usize,
    /// Payloads handed to the transport successfully.
    pub published: usize,
    /// Users that transitioned to all-clear.
    pub cleared: usize,
    /// Users skipped because nothing changed.
    pub unchanged: usize,
    /// Payloads that failed to serialize or deliver.
    pub failed_deliveries: usize,
}

impl CycleSummary {
    pub fn merge(&mut self, other: CycleSummary) {
        self.ecosystems += other.ecosystems;
        self.failed_ecosystems += other.failed_ecosystems;
        self.published += other.published;
        self.cleared += other.cleared;
        self.unchanged += other.unchanged;
        self.failed_deliveries += other.failed_deliveries;
    }
}

/// Pushes per-role notification counts to users when they change.
///
/// Provides:
/// - Full-roster cycles over every registered ecosystem
/// - Targeted cycles for an explicit set of users
/// - One-shot batch publishing that ignores the cache
///
/// All entry points take `&self`; share a notifier across threads with `Arc`.
pub struct Notifier {
    config: NotifierConfig,

    /// Last published state per (ecosystem, user).
    cache: Arc<StateCache>,

    /// Users to notify on full-roster cycles.
    roster: Arc<Roster>,

    fetcher: Arc<dyn RoleCountFetcher>,

    publisher: Arc<dyn Publisher>,
}

impl Notifier {
    /// Create a notifier with its own empty cache and roster.
    pub fn new(fetcher: Arc<dyn RoleCountFetcher>, publisher: Arc<dyn Publisher>) -> Self {
        Self::with_parts(
            NotifierConfig::default(),
            Arc::new(StateCache::new()),
            Arc::new(Roster::new()),
            fetcher,
            publisher,
        )
    }

    /// Create a notifier over an existing cache and roster.
    pub fn with_parts(
        config: NotifierConfig,
        cache: Arc<StateCache>,
        roster: Arc<Roster>,
        fetcher: Arc<dyn RoleCountFetcher>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            cache,
            roster,
            fetcher,
            publisher,
        }
    }

    pub fn cache(&self) -> &Arc<StateCache> {
        &self.cache
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Register a user to be notified on full-roster cycles.
    pub fn add_user(&self, user: UserId, ecosystem: EcosystemId) {
        self.roster.register(user, ecosystem);
    }

    // --- Cycles ---

    /// Run a cycle for every ecosystem of the roster.
    ///
    /// A failing ecosystem is logged and skipped; the others still run.
    pub fn send_notifications(&self) -> CycleSummary {
        let mut summary = CycleSummary::default();

        for (ecosystem, users) in self.roster.snapshot() {
            summary.merge(self.update_notifications(ecosystem, &users));
        }

        debug!(?summary, "roster notification cycle finished");
        summary
    }

    /// Run a cycle for the given users of one ecosystem.
    ///
    /// Only users whose counts differ from the cached state are published.
    pub fn update_notifications(&self, ecosystem: EcosystemId, users: &[UserId]) -> CycleSummary {
        let mut summary = CycleSummary {
            ecosystems: 1,
            ..Default::default()
        };

        let fresh = match self.ecosystem_stats(ecosystem, users) {
            Ok(stats) => stats,
            Err(_) => {
                summary.failed_ecosystems += 1;
                return summary;
            }
        };

        for &user in users {
            let old_stats = self.cache.get(ecosystem, user).unwrap_or_default();
            let new_stats = fresh.get(&user).cloned().unwrap_or_default();

            if !stats_changed(&old_stats, &new_stats) {
                trace!(%ecosystem, %user, "notification stats unchanged");
                summary.unchanged += 1;
                continue;
            }

            if new_stats.is_empty() {
                let cleared: Vec<NotificationRecord> =
                    old_stats.into_iter().map(NotificationRecord::cleared).collect();

                self.cache.delete(ecosystem, user);
                summary.cleared += 1;

                if self.config.publish_all_clear {
                    self.deliver(ecosystem, user, &cleared, &mut summary);
                }
                continue;
            }

            self.cache.set(ecosystem, user, new_stats.clone());
            self.deliver(ecosystem, user, &new_stats, &mut summary);
        }

        summary
    }

    /// Publish the current counts of the given users without touching the cache.
    ///
    /// Every user with at least one pending role is published, even when
    /// nothing changed since the previous call.
    pub fn send_notifications_by_request(
        &self,
        requests: &HashMap<EcosystemId, Vec<UserId>>,
    ) -> CycleSummary {
        let mut summary = CycleSummary::default();

        let mut ecosystems: Vec<_> = requests.keys().copied().collect();
        ecosystems.sort();

        for ecosystem in ecosystems {
            summary.ecosystems += 1;

            let stats = match self.ecosystem_stats(ecosystem, &requests[&ecosystem]) {
                Ok(stats) => stats,
                Err(_) => {
                    summary.failed_ecosystems += 1;
                    continue;
                }
            };

            let mut users: Vec<_> = stats.into_iter().collect();
            users.sort_by_key(|(user, _)| *user);

            for (user, records) in users {
                self.deliver(ecosystem, user, &records, &mut summary);
            }
        }

        debug!(?summary, "on-demand notification batch finished");
        summary
    }

    // --- Internals ---

    /// Fetch and group the counts of one ecosystem, logging failures.
    fn ecosystem_stats(
        &self,
        ecosystem: EcosystemId,
        users: &[UserId],
    ) -> Result<HashMap<UserId, Vec<NotificationRecord>>> {
        let rows = self.fetcher.fetch(ecosystem, users).map_err(|e| {
            error!(kind = "db_error", %ecosystem, error = %e, "getting notification count");
            e
        })?;

        aggregate(ecosystem, &rows).map_err(|e| {
            error!(kind = "parse_error", %ecosystem, error = %e, "parsing notification count");
            e
        })
    }

    /// Publish one user's records, logging failures.
    fn deliver(
        &self,
        ecosystem: EcosystemId,
        user: UserId,
        records: &[NotificationRecord],
        summary: &mut CycleSummary,
    ) {
        match send_user_stats(self.publisher.as_ref(), user, records) {
            Ok(()) => {
                trace!(%ecosystem, %user, roles = records.len(), "notification stats published");
                summary.published += 1;
            }
            Err(e) => {
                let kind = match &e {
                    NotifyError::Serialization(_) => "json_marshal_error",
                    NotifyError::Rejected { .. } => "transport_error",
                    _ => "io_error",
                };
                error!(kind, %ecosystem, %user, error = %e, "notification statistic");
                summary.failed_deliveries += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::InMemoryFetcher;
    use crate::publish::{ChannelPublisher, ChannelPublisherConfig, DeliveryHandle};
    use crate::types::RoleId;

    const ECO: EcosystemId = EcosystemId(1);

    fn setup() -> (Arc<InMemoryFetcher>, Notifier, DeliveryHandle) {
        let fetcher = Arc::new(InMemoryFetcher::new());
        let (publisher, handle) = ChannelPublisher::new(ChannelPublisherConfig::default());
        let notifier = Notifier::new(fetcher.clone(), Arc::new(publisher));
        (fetcher, notifier, handle)
    }

    #[test]
    fn test_first_cycle_publishes_and_caches() {
        let (fetcher, notifier, handle) = setup();
        fetcher.set_count(ECO, UserId(1), RoleId(1), 3);

        let summary = notifier.update_notifications(ECO, &[UserId(1)]);
        assert_eq!(summary.published, 1);

        let delivery = handle.try_recv().unwrap();
        assert_eq!(delivery.user, UserId(1));
        assert_eq!(
            delivery.records().unwrap(),
            vec![NotificationRecord::new(ECO, RoleId(1), 3)]
        );
        assert!(notifier.cache().contains(ECO, UserId(1)));
    }

    #[test]
    fn test_user_without_state_is_not_published() {
        let (_fetcher, notifier, handle) = setup();

        let summary = notifier.update_notifications(ECO, &[UserId(1)]);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.published, 0);
        assert!(handle.try_recv().is_err());
        assert!(notifier.cache().is_empty());
    }

    #[test]
    fn test_all_clear_suppressed_by_config() {
        let fetcher = Arc::new(InMemoryFetcher::new());
        let (publisher, handle) = ChannelPublisher::new(ChannelPublisherConfig::default());
        let notifier = Notifier::with_parts(
            NotifierConfig {
                publish_all_clear: false,
            },
            Arc::new(StateCache::new()),
            Arc::new(Roster::new()),
            fetcher.clone(),
            Arc::new(publisher),
        );

        fetcher.set_count(ECO, UserId(1), RoleId(1), 3);
        notifier.update_notifications(ECO, &[UserId(1)]);
        handle.drain();

        fetcher.clear_user(ECO, UserId(1));
        let summary = notifier.update_notifications(ECO, &[UserId(1)]);

        assert_eq!(summary.cleared, 1);
        assert_eq!(summary.published, 0);
        assert!(handle.try_recv().is_err());
        assert!(!notifier.cache().contains(ECO, UserId(1)));
    }

    #[test]
    fn test_duplicate_roster_entry_publishes_once() {
        let (fetcher, notifier, handle) = setup();
        fetcher.set_count(ECO, UserId(1), RoleId(1), 3);
        notifier.add_user(UserId(1), ECO);
        notifier.add_user(UserId(1), ECO);

        let summary = notifier.send_notifications();
        assert_eq!(summary.published, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(handle.drain().len(), 1);
    }

    #[test]
    fn test_summary_merge() {
        let mut a = CycleSummary {
            ecosystems: 1,
            published: 2,
            ..Default::default()
        };
        a.merge(CycleSummary {
            ecosystems: 1,
            failed_ecosystems: 1,
            cleared: 1,
            ..Default::default()
        });

        assert_eq!(a.ecosystems, 2);
        assert_eq!(a.failed_ecosystems, 1);
        assert_eq!(a.published, 2);
        assert_eq!(a.cleared, 1);
    }
}
