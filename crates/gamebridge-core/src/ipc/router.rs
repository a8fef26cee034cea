//! Main process channel router.
//!
//! Maps channel names to handlers: `on` for fire-and-forget sends, `handle`
//! for invokes that produce a reply. Invoke handlers run on their own task so
//! a slow reply never holds up other traffic from the same renderer.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::main_end::{MainEndpoint, MainMessage};
use crate::channel::Channel;
use crate::message::Payload;

type SendHandler = Box<dyn Fn(Payload) + Send + Sync>;
type InvokeFuture = Pin<Box<dyn Future<Output = Result<Value, String>> + Send>>;
type InvokeHandler = Box<dyn Fn(Payload) -> InvokeFuture + Send + Sync>;

/// Dispatches renderer messages to registered handlers.
#[derive(Default)]
pub struct MainRouter {
    listeners: HashMap<Channel, SendHandler>,
    handlers: HashMap<Channel, InvokeHandler>,
}

impl MainRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fire-and-forget listener for `channel`. Replaces any
    /// previous listener.
    #[must_use]
    pub fn on<F>(mut self, channel: impl Into<Channel>, listener: F) -> Self
    where
        F: Fn(Payload) + Send + Sync + 'static,
    {
        self.listeners.insert(channel.into(), Box::new(listener));
        self
    }

    /// Register a reply-producing handler for `channel`. Replaces any
    /// previous handler.
    #[must_use]
    pub fn handle<F, Fut>(mut self, channel: impl Into<Channel>, handler: F) -> Self
    where
        F: Fn(Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        self.handlers.insert(
            channel.into(),
            Box::new(move |payload| Box::pin(handler(payload))),
        );
        self
    }

    /// Channels with an invoke handler, sorted.
    pub fn handled_channels(&self) -> Vec<&Channel> {
        let mut channels: Vec<_> = self.handlers.keys().collect();
        channels.sort();
        channels
    }

    /// Dispatch one message.
    ///
    /// Invoke handlers are spawned onto the runtime; the reply is sent when
    /// the handler completes.
    pub fn dispatch(&self, message: MainMessage) {
        match message {
            MainMessage::Send {
                channel,
                payload,
                sender,
            } => match self.listeners.get(&channel) {
                Some(listener) => {
                    debug!(%channel, frame_id = sender.frame_id, "Dispatching send");
                    listener(payload);
                }
                None => debug!(%channel, "No listener registered, dropping send"),
            },
            MainMessage::Invoke {
                channel,
                payload,
                sender,
                reply,
            } => match self.handlers.get(&channel) {
                Some(handler) => {
                    debug!(%channel, frame_id = sender.frame_id, "Dispatching invoke");
                    let pending = handler(payload);
                    tokio::spawn(async move {
                        reply.respond(pending.await);
                    });
                }
                None => {
                    warn!(%channel, "No handler registered for invoke");
                    reply.reject(format!("No handler registered for '{channel}'"));
                }
            },
        }
    }

    /// Serve `endpoint` until the renderer end is dropped.
    pub async fn run(self, mut endpoint: MainEndpoint) {
        while let Some(message) = endpoint.recv().await {
            self.dispatch(message);
        }
        info!("Renderer disconnected, main router stopping");
    }
}
