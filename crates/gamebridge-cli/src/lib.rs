//! `GameBridge` CLI Library
//!
//! Developer tooling around the renderer bridges: print the channel
//! contract, check single authorization decisions and replay recorded
//! request files against an echoing main process.

pub mod channels_cmd;
pub mod check_cmd;
pub mod echo_main;
pub mod replay_cmd;

use gamebridge_core::bridges::{self, BridgeProfile};

/// Resolve a bridge profile by name, listing the known names on failure.
pub fn resolve_profile(name: &str) -> anyhow::Result<&'static BridgeProfile> {
    bridges::profile(name).ok_or_else(|| {
        let known: Vec<_> = bridges::PROFILES.iter().map(|p| p.name).collect();
        anyhow::anyhow!("Unknown bridge '{name}'. Known bridges: {}", known.join(", "))
    })
}
