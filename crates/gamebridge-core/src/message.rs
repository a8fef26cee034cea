//! Message types carried across the bridge.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered argument sequence forwarded as one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Vec<Value>);

impl Payload {
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for Payload {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Payload {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Build a [`Payload`] from a list of JSON-convertible expressions.
///
/// ```
/// use gamebridge_core::payload;
/// let p = payload!["key1", { "count": 2 }];
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! payload {
    () => { $crate::message::Payload::empty() };
    ($($value:tt),+ $(,)?) => {
        $crate::message::Payload::new(vec![$($crate::__private::serde_json::json!($value)),+])
    };
}

/// Identity of the process that emitted an inbound message.
///
/// Receive callbacks never see this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderMeta {
    pub process_id: u32,
    pub frame_id: u64,
}

impl SenderMeta {
    /// Metadata stamped on messages emitted by the main process.
    pub fn main_process() -> Self {
        Self {
            process_id: std::process::id(),
            frame_id: 0,
        }
    }
}

/// A message as delivered by the transport to a receive registration.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub sender: SenderMeta,
    pub payload: Payload,
}

/// Result of routing one bridge call through the authorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The call reached the transport.
    Forwarded(T),
    /// The channel was not permitted; a warning was logged.
    Denied,
}

impl<T> Outcome<T> {
    pub const fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded(_))
    }

    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }

    /// The forwarded value, or `None` for a denial.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Forwarded(value) => Some(value),
            Self::Denied => None,
        }
    }
}
