//! # Notificator
//!
//! Tracks outstanding notification counts per user and role across isolated
//! ecosystems, and pushes a user's counts to their real-time channel only
//! when they changed since the last push.
//!
//! ## Core Concepts
//!
//! - **Records**: Per-role pending counts of one user in one ecosystem
//! - **Cache**: Last published records per (ecosystem, user)
//! - **Roster**: Users registered for periodic cycles
//! - **Cycles**: Fetch, aggregate, diff against the cache, publish the deltas
//!
//! ## Example
//!
//! ```ignore
//! use notificator::{ChannelPublisher, ChannelPublisherConfig, EcosystemId, InMemoryFetcher, Notifier, RoleId, UserId};
//! use std::sync::Arc;
//!
//! let fetcher = Arc::new(InMemoryFetcher::new());
//! let (publisher, deliveries) = ChannelPublisher::new(ChannelPublisherConfig::default());
//! let notifier = Notifier::new(fetcher.clone(), Arc::new(publisher));
//!
//! notifier.add_user(UserId(1), EcosystemId(1));
//! fetcher.set_count(EcosystemId(1), UserId(1), RoleId(3), 2);
//!
//! // Publishes [{"ecosystem":1,"role_id":3,"count":2}] to user 1
//! notifier.send_notifications();
//!
//! // Nothing changed: publishes nothing
//! notifier.send_notifications();
//! ```

pub mod aggregate;
pub mod cache;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod notifier;
pub mod publish;
pub mod roster;
pub mod types;

// Re-exports
pub use aggregate::aggregate;
pub use cache::StateCache;
pub use diff::stats_changed;
pub use error::{NotifyError, Result};
pub use fetch::{InMemoryFetcher, RoleCountFetcher};
pub use notifier::{CycleSummary, Notifier, NotifierConfig};
pub use publish::{
    send_user_stats, ChannelPublisher, ChannelPublisherConfig, Delivery, DeliveryHandle, Publisher,
};
pub use roster::Roster;
pub use types::*;
