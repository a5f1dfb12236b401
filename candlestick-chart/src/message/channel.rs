//! Outbound side of the host channel

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Token asking the parent frame to push its configuration
pub const HANDSHAKE_TOKEN: &str = "sendConfig";

/// Fire-and-forget string channel to the parent frame
pub trait ParentChannel {
    fn post(&self, message: &str);
}

impl ParentChannel for mpsc::UnboundedSender<String> {
    fn post(&self, message: &str) {
        if self.send(message.to_string()).is_err() {
            warn!("parent channel closed, message dropped");
        }
    }
}

impl<C: ParentChannel + ?Sized> ParentChannel for &C {
    fn post(&self, message: &str) {
        (**self).post(message)
    }
}

/// Ask the parent for configuration. No acknowledgement is awaited.
pub fn request_config<C: ParentChannel + ?Sized>(channel: &C) {
    debug!(token = HANDSHAKE_TOKEN, "requesting configuration from parent");
    channel.post(HANDSHAKE_TOKEN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_is_posted() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_config(&tx);
        assert_eq!(rx.try_recv().unwrap(), HANDSHAKE_TOKEN);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        drop(rx);
        request_config(&tx);
    }
}
