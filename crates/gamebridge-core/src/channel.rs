//! Channels, directions and the per-bridge allow-lists.
//!
//! A channel is an opaque name compared by exact, case-sensitive string
//! equality. Each bridge owns two allow-lists: one for outbound traffic
//! (`send`/`invoke`) and one for inbound traffic (`once`). Both are fixed when
//! the bridge is built.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a logical communication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(String);

impl Channel {
    /// Create a channel from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The channel name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Channel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Channel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Channel {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a bridge operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Renderer to main, fire-and-forget.
    Send,
    /// Renderer to main, awaiting a reply.
    Invoke,
    /// Main to renderer.
    Receive,
}

impl Direction {
    /// Whether this direction is checked against the outbound list.
    pub const fn is_outbound(self) -> bool {
        matches!(self, Self::Send | Self::Invoke)
    }

    /// Lowercase name used in logs and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Invoke => "invoke",
            Self::Receive => "receive",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send" => Ok(Self::Send),
            "invoke" => Ok(Self::Invoke),
            "receive" => Ok(Self::Receive),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Immutable set of permitted channels.
///
/// Entries are fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowList {
    channels: BTreeSet<Channel>,
}

impl AllowList {
    /// An allow-list that permits nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an allow-list from a static channel table.
    pub fn from_static(channels: &[&'static str]) -> Self {
        channels.iter().copied().collect()
    }

    /// Exact-match membership test.
    pub fn contains(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    /// Iterate channels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<C: Into<Channel>> FromIterator<C> for AllowList {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            channels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The outbound and inbound allow-lists of one bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BridgeAllowLists {
    /// Channels usable with `send` and `invoke`.
    pub outbound: AllowList,
    /// Channels usable with `once`.
    pub inbound: AllowList,
}

impl BridgeAllowLists {
    pub const fn new(outbound: AllowList, inbound: AllowList) -> Self {
        Self { outbound, inbound }
    }

    /// The list that governs `direction`.
    pub const fn for_direction(&self, direction: Direction) -> &AllowList {
        if direction.is_outbound() {
            &self.outbound
        } else {
            &self.inbound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_exact_and_case_sensitive() {
        let list = AllowList::from_static(&["window-close", "translate"]);
        assert!(list.contains("window-close"));
        assert!(!list.contains("Window-Close"));
        assert!(!list.contains("window-"));
        assert!(!list.contains("window-close "));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn for_direction_maps_send_and_invoke_to_outbound() {
        let lists = BridgeAllowLists::new(
            AllowList::from_static(&["out"]),
            AllowList::from_static(&["in"]),
        );
        assert!(lists.for_direction(Direction::Send).contains("out"));
        assert!(lists.for_direction(Direction::Invoke).contains("out"));
        assert!(lists.for_direction(Direction::Receive).contains("in"));
        assert!(!lists.for_direction(Direction::Receive).contains("out"));
    }

    #[test]
    fn direction_parses_lowercase_names() {
        assert_eq!("send".parse::<Direction>(), Ok(Direction::Send));
        assert_eq!("receive".parse::<Direction>(), Ok(Direction::Receive));
        assert!("SEND".parse::<Direction>().is_err());
    }

    #[test]
    fn allow_list_serializes_as_sorted_array() {
        let list = AllowList::from_static(&["translate", "window-close"]);
        let json = serde_json::to_value(&list).unwrap_or_default();
        assert_eq!(json, serde_json::json!(["translate", "window-close"]));
    }
}
