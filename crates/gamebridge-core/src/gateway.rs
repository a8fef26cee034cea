//! Bridge gateway.
//!
//! The object handed to an isolated renderer context. Every generic call is
//! checked against the bridge's allow-lists first; permitted calls go to the
//! transport, denied calls are logged and dropped. A denial is never an
//! error for the caller.

use serde_json::Value;
use tracing::debug;

use crate::authorizer::is_allowed;
use crate::channel::{BridgeAllowLists, Channel, Direction};
use crate::logger::BridgeLogger;
use crate::message::{InboundMessage, Outcome, Payload};
use crate::transport::{Transport, TransportError};

/// Allow-list enforcing front of a [`Transport`].
pub struct BridgeGateway<T, L> {
    identity: String,
    allow_lists: BridgeAllowLists,
    transport: T,
    logger: L,
}

impl<T: Transport, L: BridgeLogger> BridgeGateway<T, L> {
    /// Create a gateway. `identity` names the bridge in denial warnings.
    pub fn new(
        identity: impl Into<String>,
        allow_lists: BridgeAllowLists,
        transport: T,
        logger: L,
    ) -> Self {
        Self {
            identity: identity.into(),
            allow_lists,
            transport,
            logger,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub const fn allow_lists(&self) -> &BridgeAllowLists {
        &self.allow_lists
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn logger(&self) -> &L {
        &self.logger
    }

    /// Fire-and-forget `data` on `channel` as one batched payload.
    pub fn send(&self, channel: &str, data: Payload) -> Outcome<()> {
        if !is_allowed(channel, Direction::Send, &self.allow_lists) {
            self.warn_unauthorized_message(channel, &data);
            return Outcome::Denied;
        }

        debug!(bridge = %self.identity, channel, args = data.len(), "Forwarding send");
        self.transport.send(&Channel::new(channel), data);
        Outcome::Forwarded(())
    }

    /// Forward `data` on `channel` and wait for the main process reply.
    ///
    /// A denied channel resolves immediately to [`Outcome::Denied`]. Errors
    /// raised by the main process are returned unchanged.
    pub async fn invoke(
        &self,
        channel: &str,
        data: Payload,
    ) -> Result<Outcome<Value>, TransportError> {
        if !is_allowed(channel, Direction::Invoke, &self.allow_lists) {
            self.warn_unauthorized_message(channel, &data);
            return Ok(Outcome::Denied);
        }

        debug!(bridge = %self.identity, channel, args = data.len(), "Forwarding invoke");
        let reply = self
            .transport
            .invoke(&Channel::new(channel), data)
            .await?;
        Ok(Outcome::Forwarded(reply))
    }

    /// Run `callback` once with the payload of the next message on `channel`.
    ///
    /// The sender metadata is stripped before `callback` runs.
    pub fn once<F>(&self, channel: &str, callback: F) -> Outcome<()>
    where
        F: FnOnce(Payload) + Send + 'static,
    {
        if !is_allowed(channel, Direction::Receive, &self.allow_lists) {
            self.logger.warn(&format!(
                "Unauthorized IPC listener from '{}' on {}",
                self.identity, channel
            ));
            return Outcome::Denied;
        }

        debug!(bridge = %self.identity, channel, "Registering one-shot listener");
        self.transport.once(
            &Channel::new(channel),
            Box::new(move |message: InboundMessage| callback(message.payload)),
        );
        Outcome::Forwarded(())
    }

    fn warn_unauthorized_message(&self, channel: &str, data: &Payload) {
        self.logger.warn(&format!(
            "Unauthorized IPC message from '{}' through {}: {}",
            self.identity, channel, data
        ));
    }
}
