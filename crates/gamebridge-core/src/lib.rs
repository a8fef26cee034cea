//! `GameBridge` Core Library
//!
//! Renderer-side IPC layer for the game updater desktop shell:
//! - Channel allow-lists and the authorization decision
//! - Bridge gateway forwarding permitted calls to the main process
//! - In-process message-passing transport and main-process router
//! - Concrete bridge profiles (message box, login)
//! - Configuration, wire format and common error types

pub mod authorizer;
pub mod bridges;
pub mod channel;
pub mod config;
pub mod error;
pub mod error_report;
pub mod gateway;
pub mod io;
pub mod ipc;
pub mod logger;
pub mod message;
pub mod platform;
pub mod tracing_init;
pub mod transport;
pub mod wire;

pub use authorizer::is_allowed;
pub use channel::{AllowList, BridgeAllowLists, Channel, Direction};
pub use config::Config;
pub use error::{Error, Result};
pub use gateway::BridgeGateway;
pub use logger::{BridgeLogger, LogLevel, MemoryLogger, TracingLogger};
pub use message::{InboundMessage, Outcome, Payload, SenderMeta};
pub use transport::{Transport, TransportError};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
