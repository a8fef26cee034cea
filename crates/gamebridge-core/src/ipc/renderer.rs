//! Renderer end of the in-process transport.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::main_end::{MainMessage, Responder};
use super::registry::ListenerRegistry;
use crate::channel::Channel;
use crate::message::{Payload, SenderMeta};
use crate::transport::{InboundHandler, Transport, TransportError};

/// Transport handed to a bridge gateway inside a renderer.
pub struct RendererTransport {
    send_tx: mpsc::UnboundedSender<MainMessage>,
    invoke_tx: mpsc::Sender<MainMessage>,
    listeners: Arc<ListenerRegistry>,
    meta: SenderMeta,
}

impl RendererTransport {
    pub(super) const fn new(
        send_tx: mpsc::UnboundedSender<MainMessage>,
        invoke_tx: mpsc::Sender<MainMessage>,
        listeners: Arc<ListenerRegistry>,
        meta: SenderMeta,
    ) -> Self {
        Self {
            send_tx,
            invoke_tx,
            listeners,
            meta,
        }
    }

    /// Identity stamped on every outgoing message.
    pub const fn sender_meta(&self) -> SenderMeta {
        self.meta
    }

    /// Number of registrations currently armed on `channel`.
    pub fn armed_listeners(&self, channel: &str) -> usize {
        self.listeners.armed_count(channel)
    }
}

impl Transport for RendererTransport {
    fn send(&self, channel: &Channel, payload: Payload) {
        let message = MainMessage::Send {
            channel: channel.clone(),
            payload,
            sender: self.meta,
        };
        if self.send_tx.send(message).is_err() {
            debug!(%channel, "Main process gone, dropping send");
        }
    }

    async fn invoke(&self, channel: &Channel, payload: Payload) -> Result<Value, TransportError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let message = MainMessage::Invoke {
            channel: channel.clone(),
            payload,
            sender: self.meta,
            reply: Responder::new(reply_tx),
        };
        self.invoke_tx
            .send(message)
            .await
            .map_err(|_| TransportError::Closed)?;

        match reply_rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(reason)) => Err(TransportError::Remote(reason)),
            Err(_) => Err(TransportError::Closed),
        }
    }

    fn once(&self, channel: &Channel, handler: InboundHandler) {
        self.listeners.arm(channel, handler);
    }
}
