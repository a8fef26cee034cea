//! The concrete bridges exposed to the application's renderer windows.
//!
//! Each bridge owns its own gateway, allow-lists and logger. The channel
//! tables below are the compatibility contract with the main process:
//! renaming or adding a channel is a breaking change.

pub mod login;
pub mod messagebox;

use serde_json::Value;

use crate::channel::{BridgeAllowLists, Channel};
use crate::message::Payload;
use crate::transport::{Transport, TransportError};

pub use login::LoginBridge;
pub use messagebox::MessageboxBridge;

/// Fixed channel answering translation requests.
pub const TRANSLATE_CHANNEL: &str = "translate";

/// Fixed channel answering with the main process working directory.
pub const CWD_CHANNEL: &str = "cwd";

/// Identity and allow-lists of a bridge, for listing and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeProfile {
    pub name: &'static str,
    pub identity: &'static str,
    pub send_channels: &'static [&'static str],
    pub receive_channels: &'static [&'static str],
}

impl BridgeProfile {
    pub fn allow_lists(&self) -> BridgeAllowLists {
        BridgeAllowLists::new(
            crate::channel::AllowList::from_static(self.send_channels),
            crate::channel::AllowList::from_static(self.receive_channels),
        )
    }
}

/// Every bridge profile, in a stable order.
pub const PROFILES: &[BridgeProfile] = &[messagebox::PROFILE, login::PROFILE];

/// Look up a profile by its short name (`messagebox`, `login`).
pub fn profile(name: &str) -> Option<&'static BridgeProfile> {
    PROFILES.iter().find(|profile| profile.name == name)
}

/// Translate `key` through the main process.
///
/// The request payload is `[key, interpolation]`, the same batched shape a
/// generic `invoke("translate", payload![key, interpolation])` produces, so
/// the main process cannot tell the two call forms apart and must not try
/// to. Non-string replies are rendered as JSON text.
pub(crate) async fn translate<T: Transport>(
    transport: &T,
    key: &str,
    interpolation: Value,
) -> Result<String, TransportError> {
    let payload = Payload::new(vec![Value::String(key.to_string()), interpolation]);
    let reply = transport
        .invoke(&Channel::new(TRANSLATE_CHANNEL), payload)
        .await?;
    Ok(match reply {
        Value::String(text) => text,
        other => other.to_string(),
    })
}
