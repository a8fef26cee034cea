//! Main process end of the in-process transport.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::registry::ListenerRegistry;
use crate::channel::Channel;
use crate::message::{InboundMessage, Payload, SenderMeta};

/// A message arriving at the main process from a renderer.
#[derive(Debug)]
pub enum MainMessage {
    Send {
        channel: Channel,
        payload: Payload,
        sender: SenderMeta,
    },
    Invoke {
        channel: Channel,
        payload: Payload,
        sender: SenderMeta,
        reply: Responder,
    },
}

impl MainMessage {
    pub const fn channel(&self) -> &Channel {
        match self {
            Self::Send { channel, .. } | Self::Invoke { channel, .. } => channel,
        }
    }

    pub const fn payload(&self) -> &Payload {
        match self {
            Self::Send { payload, .. } | Self::Invoke { payload, .. } => payload,
        }
    }
}

/// Reply slot for one invoke. Dropping it without answering fails the
/// renderer's invoke with [`TransportError::Closed`](crate::TransportError::Closed).
#[derive(Debug)]
pub struct Responder(oneshot::Sender<Result<Value, String>>);

impl Responder {
    pub(super) const fn new(tx: oneshot::Sender<Result<Value, String>>) -> Self {
        Self(tx)
    }

    /// Answer with a value.
    pub fn resolve(self, value: Value) {
        self.respond(Ok(value));
    }

    /// Answer with an error message.
    pub fn reject(self, reason: impl Into<String>) {
        self.respond(Err(reason.into()));
    }

    pub fn respond(self, result: Result<Value, String>) {
        if self.0.send(result).is_err() {
            debug!("Invoke caller went away before the reply");
        }
    }
}

/// Cloneable handle that pushes messages to the renderer's registrations.
#[derive(Clone)]
pub struct Emitter {
    listeners: Arc<ListenerRegistry>,
    meta: SenderMeta,
}

impl Emitter {
    /// Deliver `payload` on `channel`. Returns how many registrations fired.
    pub fn emit(&self, channel: &str, payload: Payload) -> usize {
        let message = InboundMessage {
            sender: self.meta,
            payload,
        };
        let delivered = self.listeners.deliver(channel, &message);
        debug!(channel, delivered, "Emitted to renderer");
        delivered
    }
}

/// Main process side of a renderer connection.
pub struct MainEndpoint {
    sends: mpsc::UnboundedReceiver<MainMessage>,
    invokes: mpsc::Receiver<MainMessage>,
    emitter: Emitter,
}

impl MainEndpoint {
    pub(super) const fn new(
        sends: mpsc::UnboundedReceiver<MainMessage>,
        invokes: mpsc::Receiver<MainMessage>,
        listeners: Arc<ListenerRegistry>,
        meta: SenderMeta,
    ) -> Self {
        Self {
            sends,
            invokes,
            emitter: Emitter { listeners, meta },
        }
    }

    /// Next message from the renderer, or `None` once the renderer is gone
    /// and both queues are drained.
    ///
    /// Queued sends are taken before invokes, so a send issued before an
    /// invoke is always seen first.
    pub async fn recv(&mut self) -> Option<MainMessage> {
        tokio::select! {
            biased;
            Some(message) = self.sends.recv() => Some(message),
            message = self.invokes.recv() => message,
        }
    }

    /// Deliver `payload` on `channel` to the renderer.
    pub fn emit(&self, channel: &str, payload: Payload) -> usize {
        self.emitter.emit(channel, payload)
    }

    pub fn emitter(&self) -> Emitter {
        self.emitter.clone()
    }
}
