//! Contract between a bridge and the message-passing transport.
//!
//! The transport is the only way to reach the main process. It carries
//! fire-and-forget sends, request/reply invokes and one-shot inbound
//! registrations.

use std::future::Future;

use serde_json::Value;

use crate::channel::Channel;
use crate::message::{InboundMessage, Payload};

/// Callback fired once with the next inbound message on a channel.
pub type InboundHandler = Box<dyn FnOnce(InboundMessage) + Send + 'static>;

/// Failure reported for a forwarded `invoke`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The main process end of the transport is gone.
    #[error("Transport closed: main process is not listening")]
    Closed,

    /// The main process handled the call and raised an error.
    #[error("Main process error: {0}")]
    Remote(String),
}

/// Message-passing transport towards the main process.
pub trait Transport: Send + Sync {
    /// Deliver `payload` on `channel` without waiting for anything.
    fn send(&self, channel: &Channel, payload: Payload);

    /// Deliver `payload` on `channel` and wait for the main process reply.
    fn invoke(
        &self,
        channel: &Channel,
        payload: Payload,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;

    /// Arm `handler` for the next inbound message on `channel`.
    fn once(&self, channel: &Channel, handler: InboundHandler);
}
