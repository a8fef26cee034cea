//! One-shot listener registry shared by both transport ends.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::channel::Channel;
use crate::message::InboundMessage;
use crate::transport::InboundHandler;

#[derive(Default)]
pub(super) struct ListenerRegistry {
    armed: Mutex<HashMap<Channel, Vec<InboundHandler>>>,
}

impl ListenerRegistry {
    pub(super) fn arm(&self, channel: &Channel, handler: InboundHandler) {
        match self.armed.lock() {
            Ok(mut armed) => armed.entry(channel.clone()).or_default().push(handler),
            Err(_) => warn!(%channel, "Listener registry poisoned, dropping registration"),
        }
    }

    /// Fire and consume every registration armed on `channel`.
    ///
    /// Handlers run after the lock is released, so a handler may arm a new
    /// registration; that one waits for the next message.
    pub(super) fn deliver(&self, channel: &str, message: &InboundMessage) -> usize {
        let handlers = match self.armed.lock() {
            Ok(mut armed) => armed.remove(channel).unwrap_or_default(),
            Err(_) => {
                warn!(channel, "Listener registry poisoned, dropping message");
                return 0;
            }
        };

        let delivered = handlers.len();
        for handler in handlers {
            handler(message.clone());
        }
        delivered
    }

    pub(super) fn armed_count(&self, channel: &str) -> usize {
        self.armed
            .lock()
            .map(|armed| armed.get(channel).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}
