//! Bridge for the message box window.
//!
//! Exposes two namespaces: `API` (path join, working directory, generic
//! send/invoke/once, translation, logging) and `IO` (read-only files).

use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use super::{BridgeProfile, CWD_CHANNEL};
use crate::channel::Channel;
use crate::error_report::{self, UnhandledError};
use crate::gateway::BridgeGateway;
use crate::io::ReadFiles;
use crate::logger::BridgeLogger;
use crate::message::{Outcome, Payload};
use crate::transport::{Transport, TransportError};

pub const IDENTITY: &str = "messagebox-preload";

/// Renderer to main channels.
pub const SEND_CHANNELS: &[&str] = &["window-close", "window-resize", "translate"];

/// Main to renderer channels.
pub const RECEIVE_CHANNELS: &[&str] = &["window-arguments"];

pub const PROFILE: BridgeProfile = BridgeProfile {
    name: "messagebox",
    identity: IDENTITY,
    send_channels: SEND_CHANNELS,
    receive_channels: RECEIVE_CHANNELS,
};

pub struct MessageboxBridge<T, L> {
    gateway: BridgeGateway<T, L>,
    files: ReadFiles,
}

impl<T: Transport, L: BridgeLogger> MessageboxBridge<T, L> {
    pub fn new(transport: T, logger: L) -> Self {
        Self {
            gateway: BridgeGateway::new(IDENTITY, PROFILE.allow_lists(), transport, logger),
            files: ReadFiles,
        }
    }

    /// The `API` namespace.
    pub const fn api(&self) -> MessageboxApi<'_, T, L> {
        MessageboxApi {
            gateway: &self.gateway,
        }
    }

    /// The `IO` namespace.
    pub const fn io(&self) -> &ReadFiles {
        &self.files
    }

    pub const fn gateway(&self) -> &BridgeGateway<T, L> {
        &self.gateway
    }

    /// Log and surface an error that escaped window code.
    pub async fn report_error(&self, error: &UnhandledError) {
        error_report::report_unhandled_error(
            self.gateway.transport(),
            self.gateway.logger(),
            error,
        )
        .await;
    }

    /// Log and surface a rejection nobody handled.
    pub async fn report_rejection(&self, reason: &str) {
        error_report::report_unhandled_rejection(
            self.gateway.transport(),
            self.gateway.logger(),
            reason,
        )
        .await;
    }
}

/// `API` namespace of the message box bridge.
pub struct MessageboxApi<'a, T, L> {
    gateway: &'a BridgeGateway<T, L>,
}

impl<T: Transport, L: BridgeLogger> MessageboxApi<'_, T, L> {
    /// Join path segments with the platform separator.
    #[allow(clippy::unused_self)]
    pub fn join<I, S>(&self, paths: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        join_normalized(paths)
    }

    /// Working directory of the main process.
    pub async fn cwd(&self) -> Result<Value, TransportError> {
        self.gateway
            .transport()
            .invoke(&Channel::new(CWD_CHANNEL), Payload::empty())
            .await
    }

    pub fn send(&self, channel: &str, data: Payload) -> Outcome<()> {
        self.gateway.send(channel, data)
    }

    pub async fn invoke(
        &self,
        channel: &str,
        data: Payload,
    ) -> Result<Outcome<Value>, TransportError> {
        self.gateway.invoke(channel, data).await
    }

    pub fn once<F>(&self, channel: &str, callback: F) -> Outcome<()>
    where
        F: FnOnce(Payload) + Send + 'static,
    {
        self.gateway.once(channel, callback)
    }

    /// Translate `key` in the user's language.
    pub async fn translate(&self, key: &str, interpolation: Value) -> Result<String, TransportError> {
        super::translate(self.gateway.transport(), key, interpolation).await
    }

    /// Logger shared with the rest of this bridge.
    pub const fn log(&self) -> &L {
        self.gateway.logger()
    }
}

/// Lexical join in the manner of Node's `path.join`.
///
/// Only the first segment may contribute a root; later absolute segments are
/// appended. `.` is dropped and `..` removes the previous normal component,
/// or stays when there is none and the path is relative. An empty result is
/// `.`. Symlinks are not resolved.
fn join_normalized<I, S>(paths: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for (index, segment) in paths.into_iter().enumerate() {
        for component in segment.as_ref().components() {
            match component {
                Component::Prefix(_) | Component::RootDir if index > 0 => {}
                Component::CurDir => {}
                Component::ParentDir => {
                    let after_normal =
                        matches!(joined.components().next_back(), Some(Component::Normal(_)));
                    if after_normal {
                        joined.pop();
                    } else if !joined.has_root() {
                        joined.push("..");
                    }
                }
                other => joined.push(other),
            }
        }
    }
    if joined.as_os_str().is_empty() {
        joined.push(".");
    }
    joined
}
