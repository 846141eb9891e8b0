//! Bounded in-process transport.

use crate::error::{NotifyError, Result};
use crate::types::UserId;
use crossbeam_channel::{bounded, Sender, TrySendError};

use super::types::{ChannelPublisherConfig, Delivery, DeliveryHandle};
use super::Publisher;

/// Publisher that pushes payloads onto a bounded channel.
///
/// Never blocks: a full buffer rejects the payload, a dropped
/// [`DeliveryHandle`] is a delivery error.
pub struct ChannelPublisher {
    sender: Sender<Delivery>,
}

impl ChannelPublisher {
    /// Create a publisher and the handle its payloads arrive on.
    pub fn new(config: ChannelPublisherConfig) -> (Self, DeliveryHandle) {
        let (sender, receiver) = bounded(config.buffer_size);
        (Self { sender }, DeliveryHandle { receiver })
    }

    /// Payloads waiting to be received.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, user: UserId, payload: &str) -> Result<bool> {
        let delivery = Delivery {
            user,
            payload: payload.to_string(),
        };

        match self.sender.try_send(delivery) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Disconnected(_)) => Err(NotifyError::Delivery(format!(
                "channel for user {} is closed",
                user
            ))),
        }
    }
}
