//! Outbound delivery of notification payloads.
//!
//! A [`Publisher`] hands a serialized record list to the real-time channel
//! of one user. Delivery is fire-and-forget: failures are reported to the
//! caller and never retried.
//!
//! [`ChannelPublisher`] is an in-process transport over a bounded channel:
//!
//! ```ignore
//! let (publisher, handle) = ChannelPublisher::new(ChannelPublisherConfig::default());
//!
//! send_user_stats(&publisher, UserId(1), &records)?;
//!
//! let delivery = handle.recv()?;
//! println!("{} <- {}", delivery.user, delivery.payload);
//! ```

mod channel;
mod types;

pub use channel::ChannelPublisher;
pub use types::{ChannelPublisherConfig, Delivery, DeliveryHandle};

use crate::error::{NotifyError, Result};
use crate::types::{NotificationRecord, UserId};

/// Transport to a user's real-time channel.
pub trait Publisher: Send + Sync {
    /// Deliver `payload` to `user`.
    ///
    /// `Ok(false)` means the transport rejected the message.
    fn publish(&self, user: UserId, payload: &str) -> Result<bool>;
}

/// Serialize `records` as a JSON array and publish it to `user`.
///
/// Nothing reaches the transport if serialization fails.
pub fn send_user_stats(
    publisher: &dyn Publisher,
    user: UserId,
    records: &[NotificationRecord],
) -> Result<()> {
    let payload = serde_json::to_string(records)?;

    if publisher.publish(user, &payload)? {
        Ok(())
    } else {
        Err(NotifyError::Rejected { user })
    }
}
