//! `check`: answer a single authorization question.

use std::io::Write;

use gamebridge_core::bridges::BridgeProfile;
use gamebridge_core::{Direction, is_allowed};

/// Print `allowed` or `denied` and return the decision.
pub fn run<W: Write>(
    profile: &BridgeProfile,
    direction: Direction,
    channel: &str,
    out: &mut W,
) -> anyhow::Result<bool> {
    let allowed = is_allowed(channel, direction, &profile.allow_lists());
    tracing::debug!(bridge = profile.name, %direction, channel, allowed, "Checked channel");
    writeln!(out, "{}", if allowed { "allowed" } else { "denied" })?;
    Ok(allowed)
}
