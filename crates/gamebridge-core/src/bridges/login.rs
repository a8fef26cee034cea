//! Bridge for the login window.
//!
//! Exposes `API` (generic send/invoke, translation, logging), `IO` (read,
//! write and existence checks for the credentials file) and `F95` (platform
//! login). The login window never listens for main process messages, so its
//! inbound allow-list is empty.

use serde_json::Value;

use super::BridgeProfile;
use crate::error::Result;
use crate::error_report::{self, UnhandledError};
use crate::gateway::BridgeGateway;
use crate::io::ReadWriteFiles;
use crate::logger::BridgeLogger;
use crate::message::{Outcome, Payload};
use crate::platform::{LoginResult, PlatformAuth};
use crate::transport::{Transport, TransportError};

pub const IDENTITY: &str = "login-preload";

/// Renderer to main channels.
pub const SEND_CHANNELS: &[&str] = &["window-close", "credentials-path", "translate"];

/// Main to renderer channels.
pub const RECEIVE_CHANNELS: &[&str] = &[];

pub const PROFILE: BridgeProfile = BridgeProfile {
    name: "login",
    identity: IDENTITY,
    send_channels: SEND_CHANNELS,
    receive_channels: RECEIVE_CHANNELS,
};

pub struct LoginBridge<T, L, P> {
    gateway: BridgeGateway<T, L>,
    files: ReadWriteFiles,
    platform: P,
}

impl<T: Transport, L: BridgeLogger, P: PlatformAuth> LoginBridge<T, L, P> {
    pub fn new(transport: T, logger: L, platform: P) -> Self {
        Self {
            gateway: BridgeGateway::new(IDENTITY, PROFILE.allow_lists(), transport, logger),
            files: ReadWriteFiles,
            platform,
        }
    }

    /// The `API` namespace.
    pub const fn api(&self) -> LoginApi<'_, T, L> {
        LoginApi {
            gateway: &self.gateway,
        }
    }

    /// The `IO` namespace.
    pub const fn io(&self) -> &ReadWriteFiles {
        &self.files
    }

    /// The `F95` namespace.
    pub const fn f95(&self) -> PlatformApi<'_, P> {
        PlatformApi {
            platform: &self.platform,
        }
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

/// `API` namespace of the login bridge. It has no `once`.
pub struct LoginApi<'a, T, L> {
    gateway: &'a BridgeGateway<T, L>,
}

impl<T: Transport, L: BridgeLogger> LoginApi<'_, T, L> {
    pub async fn invoke(
        &self,
        channel: &str,
        data: Payload,
    ) -> std::result::Result<Outcome<Value>, TransportError> {
        self.gateway.invoke(channel, data).await
    }

    pub fn send(&self, channel: &str, data: Payload) -> Outcome<()> {
        self.gateway.send(channel, data)
    }

    /// Translate `key` in the user's language.
    pub async fn translate(
        &self,
        key: &str,
        interpolation: Value,
    ) -> std::result::Result<String, TransportError> {
        super::translate(self.gateway.transport(), key, interpolation).await
    }

    pub const fn log(&self) -> &L {
        self.gateway.logger()
    }
}

/// `F95` namespace of the login bridge.
pub struct PlatformApi<'a, P> {
    platform: &'a P,
}

impl<P: PlatformAuth> PlatformApi<'_, P> {
    /// Log in to the platform.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult> {
        self.platform.login(username, password).await
    }
}
