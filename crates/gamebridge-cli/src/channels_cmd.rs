//! `channels`: print the allow-lists of one or every bridge.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::Write;

use serde::Serialize;

use gamebridge_core::Channel;
use gamebridge_core::bridges::{BridgeProfile, PROFILES};

#[derive(Debug, Serialize)]
struct ProfileView<'a> {
    name: &'a str,
    identity: &'a str,
    outbound: Vec<&'a str>,
    inbound: Vec<&'a str>,
}

/// Write the channel contract of `profile` (or every profile) to `out`.
pub fn run<W: Write>(
    profile: Option<&'static BridgeProfile>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let selected: Vec<&BridgeProfile> = match profile {
        Some(profile) => vec![profile],
        None => PROFILES.iter().collect(),
    };

    let lists: Vec<_> = selected.iter().map(|p| (*p, p.allow_lists())).collect();
    let views: Vec<ProfileView<'_>> = lists
        .iter()
        .map(|(profile, lists)| ProfileView {
            name: profile.name,
            identity: profile.identity,
            outbound: lists.outbound.iter().map(Channel::as_str).collect(),
            inbound: lists.inbound.iter().map(Channel::as_str).collect(),
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &views)?;
        writeln!(out)?;
        return Ok(());
    }

    for view in views {
        writeln!(out, "{} ({})", view.name, view.identity)?;
        writeln!(out, "  send/invoke: {}", render(&view.outbound))?;
        writeln!(out, "  receive:     {}", render(&view.inbound))?;
    }
    Ok(())
}

fn render(channels: &[&str]) -> String {
    if channels.is_empty() {
        "(none)".to_string()
    } else {
        channels.join(", ")
    }
}
