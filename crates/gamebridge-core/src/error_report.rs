//! Unhandled error reporting.
//!
//! When renderer code hits an unhandled error or rejection the bridge logs
//! it and asks the main process to show an error message box on the fixed
//! `require-messagebox` channel.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::logger::BridgeLogger;
use crate::message::Payload;
use crate::transport::Transport;

/// Channel used to ask the main process for a message box.
pub const REQUIRE_MESSAGEBOX_CHANNEL: &str = "require-messagebox";

/// Where users are asked to report crashes.
pub const ISSUE_TRACKER_URL: &str = "https://github.com/MillenniumEarl/F95GameUpdater";

const TERMINATE_ADVICE: &str =
    "It is advisable to terminate the application to avoid unpredictable behavior.";

/// An error that escaped renderer code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub stack: Option<String>,
}

/// Button shown in a message box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBoxButton {
    pub name: String,
}

/// Argument of a `require-messagebox` invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBoxRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub buttons: Vec<MessageBoxButton>,
}

impl MessageBoxRequest {
    fn error(title: &str, message: String) -> Self {
        Self {
            kind: "error".to_string(),
            title: title.to_string(),
            message,
            buttons: vec![MessageBoxButton {
                name: "close".to_string(),
            }],
        }
    }

    /// Message box for an unhandled error.
    pub fn unhandled_error(error: &UnhandledError) -> Self {
        let mut lines = vec![
            format!("{} at line {}:{}.", error.message, error.line, error.column),
            TERMINATE_ADVICE.to_string(),
        ];
        if let Some(stack) = &error.stack {
            lines.push(stack.clone());
        }
        lines.push(format!("Please report this error on {ISSUE_TRACKER_URL}"));
        Self::error("Unhandled error", lines.join("\n"))
    }

    /// Message box for an unhandled promise rejection.
    pub fn unhandled_rejection(reason: &str) -> Self {
        let message = [
            format!("{reason}."),
            TERMINATE_ADVICE.to_string(),
            format!("Please report this error on {ISSUE_TRACKER_URL}"),
        ]
        .join("\n");
        Self::error("Unhandled promise rejection", message)
    }
}

/// Log `error` and ask the main process to show it.
pub async fn report_unhandled_error<T, L>(transport: &T, logger: &L, error: &UnhandledError)
where
    T: Transport,
    L: BridgeLogger,
{
    let mut logged = format!("{} at line {}:{}.", error.message, error.line, error.column);
    if let Some(stack) = &error.stack {
        logged.push('\n');
        logged.push_str(stack);
    }
    logger.error(&logged);
    require_messagebox(transport, logger, &MessageBoxRequest::unhandled_error(error)).await;
}

/// Log an unhandled rejection and ask the main process to show it.
pub async fn report_unhandled_rejection<T, L>(transport: &T, logger: &L, reason: &str)
where
    T: Transport,
    L: BridgeLogger,
{
    logger.error(reason);
    require_messagebox(
        transport,
        logger,
        &MessageBoxRequest::unhandled_rejection(reason),
    )
    .await;
}

async fn require_messagebox<T, L>(transport: &T, logger: &L, request: &MessageBoxRequest)
where
    T: Transport,
    L: BridgeLogger,
{
    let argument = match serde_json::to_value(request) {
        Ok(value) => value,
        Err(error) => {
            logger.error(&format!("Failed to encode message box request: {error}"));
            return;
        }
    };
    let channel = Channel::new(REQUIRE_MESSAGEBOX_CHANNEL);
    if let Err(error) = transport.invoke(&channel, Payload::new(vec![argument])).await {
        logger.error(&format!("Failed to show error message box: {error}"));
    }
}
