//! Channel authorization.
//!
//! Pure lookup against a bridge's allow-lists. Default-deny: an empty or
//! missing channel name is never permitted.

use crate::channel::{BridgeAllowLists, Direction};

/// Whether `channel` may be used in `direction` on a bridge with `lists`.
///
/// Matching is exact and case-sensitive; there are no wildcards.
pub fn is_allowed<'a>(
    channel: impl Into<Option<&'a str>>,
    direction: Direction,
    lists: &BridgeAllowLists,
) -> bool {
    match channel.into() {
        Some(name) if !name.is_empty() => lists.for_direction(direction).contains(name),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::AllowList;

    fn lists() -> BridgeAllowLists {
        BridgeAllowLists::new(
            AllowList::from_static(&["window-close", "translate"]),
            AllowList::from_static(&["window-arguments"]),
        )
    }

    #[test]
    fn allows_listed_outbound_channel() {
        assert!(is_allowed("window-close", Direction::Send, &lists()));
        assert!(is_allowed("translate", Direction::Invoke, &lists()));
    }

    #[test]
    fn denies_unlisted_channel() {
        assert!(!is_allowed("evil-channel", Direction::Send, &lists()));
    }

    #[test]
    fn denies_prefix_and_case_variants() {
        assert!(!is_allowed("window", Direction::Send, &lists()));
        assert!(!is_allowed("TRANSLATE", Direction::Invoke, &lists()));
        assert!(!is_allowed("window-*", Direction::Send, &lists()));
    }

    #[test]
    fn denies_empty_and_missing_channel() {
        assert!(!is_allowed("", Direction::Send, &lists()));
        assert!(!is_allowed(None, Direction::Invoke, &lists()));
        assert!(!is_allowed(None, Direction::Receive, &lists()));
    }

    #[test]
    fn directions_are_independent() {
        assert!(!is_allowed("window-arguments", Direction::Send, &lists()));
        assert!(!is_allowed("window-close", Direction::Receive, &lists()));
        assert!(is_allowed("window-arguments", Direction::Receive, &lists()));
    }

    #[test]
    fn empty_lists_deny_everything() {
        let empty = BridgeAllowLists::default();
        assert!(!is_allowed("window-close", Direction::Send, &empty));
        assert!(!is_allowed("window-arguments", Direction::Receive, &empty));
    }
}
