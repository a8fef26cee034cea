//! Newline-delimited JSON request format.
//!
//! One request per line:
//! `{"op": "send" | "invoke" | "once", "channel": "...", "payload": [...]}`.
//! Tolerant reader: unknown fields are ignored, a missing `payload` is empty.
//! A missing or non-string `channel` is not a parse error; the request is
//! kept with no channel and the bridge denies it.

use serde_json::Value;

use crate::channel::Direction;
use crate::error::{Error, Result};
use crate::message::Payload;

/// A bridge request as decoded from the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub direction: Direction,
    /// `None` when the channel was missing or not a string.
    pub channel: Option<String>,
    pub payload: Payload,
}

/// Parse a single NDJSON line.
pub fn parse_line(line: &str) -> Result<RawRequest> {
    let raw: Value = serde_json::from_str(line)?;
    parse_value(&raw)
}

/// Parse a JSON value into a request.
pub fn parse_value(raw: &Value) -> Result<RawRequest> {
    let op = raw
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Wire("Missing 'op' field".into()))?;

    let direction = match op {
        "send" => Direction::Send,
        "invoke" => Direction::Invoke,
        "once" => Direction::Receive,
        other => return Err(Error::Wire(format!("Unknown op '{other}'"))),
    };

    let channel = raw
        .get("channel")
        .and_then(Value::as_str)
        .map(String::from);

    let payload = match raw.get("payload") {
        None | Some(Value::Null) => Payload::empty(),
        Some(Value::Array(values)) => Payload::new(values.clone()),
        Some(other) => Payload::new(vec![other.clone()]),
    };

    Ok(RawRequest {
        direction,
        channel,
        payload,
    })
}

/// Parse every non-blank line, pairing each result with its 1-based line
/// number.
pub fn parse_lines(input: &str) -> Vec<(usize, Result<RawRequest>)> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, parse_line(line)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_invoke_with_payload() {
        let req =
            parse_line(r#"{"op":"invoke","channel":"translate","payload":["key1",{"count":2}]}"#)
                .unwrap();
        assert_eq!(req.direction, Direction::Invoke);
        assert_eq!(req.channel.as_deref(), Some("translate"));
        assert_eq!(req.payload.values(), &[json!("key1"), json!({"count": 2})]);
    }

    #[test]
    fn once_maps_to_receive_direction() {
        let req = parse_line(r#"{"op":"once","channel":"window-arguments"}"#).unwrap();
        assert_eq!(req.direction, Direction::Receive);
        assert!(req.payload.is_empty());
    }

    #[test]
    fn non_string_channel_becomes_missing() {
        let req = parse_line(r#"{"op":"send","channel":42}"#).unwrap();
        assert_eq!(req.channel, None);

        let req = parse_line(r#"{"op":"send"}"#).unwrap();
        assert_eq!(req.channel, None);
    }

    #[test]
    fn scalar_payload_is_wrapped() {
        let req = parse_line(r#"{"op":"send","channel":"c","payload":"x"}"#).unwrap();
        assert_eq!(req.payload.values(), &[json!("x")]);
    }

    #[test]
    fn unknown_op_is_error() {
        assert!(matches!(
            parse_line(r#"{"op":"emit","channel":"c"}"#),
            Err(Error::Wire(_))
        ));
        assert!(matches!(parse_line("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn parse_lines_skips_blank_lines_and_keeps_numbers() {
        let input = "{\"op\":\"send\",\"channel\":\"a\"}\n\n   \n{\"op\":\"bogus\"}\n";
        let parsed = parse_lines(input);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, 1);
        assert!(parsed[0].1.is_ok());
        assert_eq!(parsed[1].0, 4);
        assert!(parsed[1].1.is_err());
    }
}
