//! Stand-in main process for replays.
//!
//! Every outbound channel of the bridge, plus the fixed channels the bridges
//! invoke directly, answers with `{"channel": ..., "payload": [...]}`.

use serde_json::json;
use tracing::info;

use gamebridge_core::bridges::{BridgeProfile, CWD_CHANNEL, TRANSLATE_CHANNEL};
use gamebridge_core::error_report::REQUIRE_MESSAGEBOX_CHANNEL;
use gamebridge_core::ipc::MainRouter;

/// Build a router that echoes every call it can receive from `profile`.
pub fn router(profile: &BridgeProfile) -> MainRouter {
    let fixed = [TRANSLATE_CHANNEL, CWD_CHANNEL, REQUIRE_MESSAGEBOX_CHANNEL];
    let mut channels: Vec<&'static str> = profile.send_channels.to_vec();
    for channel in fixed {
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }

    channels.into_iter().fold(MainRouter::new(), |router, channel| {
        router
            .on(channel, move |payload| {
                info!(channel, %payload, "Main process received send");
            })
            .handle(channel, move |payload| async move {
                Ok::<_, String>(json!({ "channel": channel, "payload": payload }))
            })
    })
}
