//! Types for the in-process channel transport.

use crate::error::Result;
use crate::types::{NotificationRecord, UserId};

/// Configuration for a [`ChannelPublisher`](super::ChannelPublisher).
#[derive(Clone, Debug)]
pub struct ChannelPublisherConfig {
    /// Max undelivered payloads before the transport starts rejecting.
    /// Default: 1000
    pub buffer_size: usize,
}

impl Default for ChannelPublisherConfig {
    fn default() -> Self {
        Self { buffer_size: 1000 }
    }
}

/// A payload addressed to one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub user: UserId,
    /// JSON array of notification records.
    pub payload: String,
}

impl Delivery {
    /// Decode the payload back into records.
    pub fn records(&self) -> Result<Vec<NotificationRecord>> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

/// Receiving side of a channel transport.
pub struct DeliveryHandle {
    pub receiver: crossbeam_channel::Receiver<Delivery>,
}

impl DeliveryHandle {
    /// Receive the next delivery (blocking).
    pub fn recv(&self) -> std::result::Result<Delivery, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a delivery (non-blocking).
    pub fn try_recv(&self) -> std::result::Result<Delivery, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> std::result::Result<Delivery, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Take everything currently buffered.
    pub fn drain(&self) -> Vec<Delivery> {
        self.receiver.try_iter().collect()
    }
}
