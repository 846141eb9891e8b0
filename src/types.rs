//! Core types for the notificator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant boundary; notification state and rosters are partitioned by it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EcosystemId(pub i64);

impl fmt::Debug for EcosystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcosystemId({})", self.0)
    }
}

impl fmt::Display for EcosystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipient of notifications.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification sub-category within an ecosystem.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub i64);

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoleId({})", self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outstanding notification count for one role within one ecosystem.
///
/// Serializes as `{"ecosystem": .., "role_id": .., "count": ..}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "ecosystem")]
    pub ecosystem_id: EcosystemId,

    pub role_id: RoleId,

    #[serde(rename = "count")]
    pub records_count: i64,
}

impl NotificationRecord {
    pub fn new(ecosystem_id: EcosystemId, role_id: RoleId, records_count: i64) -> Self {
        Self {
            ecosystem_id,
            role_id,
            records_count,
        }
    }

    /// Same role with its count reset to zero (used for the all-clear payload).
    pub fn cleared(self) -> Self {
        Self {
            records_count: 0,
            ..self
        }
    }
}

/// Key of a cached per-user state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub ecosystem_id: EcosystemId,
    pub user_id: UserId,
}

impl CacheKey {
    pub fn new(ecosystem_id: EcosystemId, user_id: UserId) -> Self {
        Self {
            ecosystem_id,
            user_id,
        }
    }
}

/// A raw pending-count row as returned by a [`RoleCountFetcher`].
///
/// Every column holds an integer in text form.
///
/// [`RoleCountFetcher`]: crate::fetch::RoleCountFetcher
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub recipient_id: String,
    pub role_id: String,
    pub cnt: String,
}

impl RawRow {
    pub fn new(
        recipient_id: impl Into<String>,
        role_id: impl Into<String>,
        cnt: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            role_id: role_id.into(),
            cnt: cnt.into(),
        }
    }
}
