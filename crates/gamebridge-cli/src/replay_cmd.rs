//! `replay`: run a recorded NDJSON request file through a bridge.
//!
//! Each request goes through the real gateway and in-process transport; the
//! main process is the echo router. One outcome line is printed per request.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use gamebridge_core::bridges::BridgeProfile;
use gamebridge_core::wire::{self, RawRequest};
use gamebridge_core::{
    BridgeGateway, BridgeLogger, Direction, LogLevel, Outcome, Payload, TracingLogger, Transport,
    ipc,
};

use crate::echo_main;

/// Counts of what happened during a replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub forwarded: usize,
    pub denied: usize,
    pub failed: usize,
    pub malformed: usize,
}

/// Logger that forwards to `tracing` and keeps denial warnings for the
/// report.
#[derive(Clone)]
struct ReplayLogger {
    inner: TracingLogger,
    warnings: Arc<Mutex<Vec<String>>>,
}

impl BridgeLogger for ReplayLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.inner.log(level, message);
        if level == LogLevel::Warn
            && let Ok(mut warnings) = self.warnings.lock()
        {
            warnings.push(message.to_string());
        }
    }
}

/// Replay the requests in the file at `path`.
pub async fn run_path<W: Write>(
    profile: &'static BridgeProfile,
    path: &Path,
    queue_capacity: usize,
    out: &mut W,
) -> anyhow::Result<ReplaySummary> {
    let input = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    run(profile, &input, queue_capacity, out).await
}

/// Replay NDJSON `input` through `profile`'s bridge.
pub async fn run<W: Write>(
    profile: &'static BridgeProfile,
    input: &str,
    queue_capacity: usize,
    out: &mut W,
) -> anyhow::Result<ReplaySummary> {
    let (transport, endpoint) = ipc::channel(queue_capacity);
    let main = tokio::spawn(echo_main::router(profile).run(endpoint));

    let logger = ReplayLogger {
        inner: TracingLogger::new(profile.identity),
        warnings: Arc::default(),
    };
    let gateway = BridgeGateway::new(
        profile.identity,
        profile.allow_lists(),
        transport,
        logger.clone(),
    );

    let mut summary = ReplaySummary::default();
    for (line, parsed) in wire::parse_lines(input) {
        match parsed {
            Ok(request) => {
                let rendered = replay_one(&gateway, &request, &mut summary).await;
                writeln!(
                    out,
                    "{line}: {} {} -> {rendered}",
                    op_name(request.direction),
                    request.channel.as_deref().unwrap_or("<missing>")
                )?;
            }
            Err(error) => {
                summary.malformed += 1;
                warn!(line, %error, "Skipping malformed request");
                writeln!(out, "{line}: malformed -> {error}")?;
            }
        }
    }

    drop(gateway);
    main.await?;

    info!(
        bridge = profile.name,
        forwarded = summary.forwarded,
        denied = summary.denied,
        failed = summary.failed,
        malformed = summary.malformed,
        warnings = logger.warnings.lock().map(|w| w.len()).unwrap_or(0),
        "Replay finished"
    );
    Ok(summary)
}

async fn replay_one<T, L>(
    gateway: &BridgeGateway<T, L>,
    request: &RawRequest,
    summary: &mut ReplaySummary,
) -> String
where
    T: Transport,
    L: BridgeLogger,
{
    // A missing channel is checked as the empty name, which is always denied.
    let channel = request.channel.as_deref().unwrap_or_default();
    let payload: Payload = request.payload.clone();

    let outcome = match request.direction {
        Direction::Send => gateway
            .send(channel, payload)
            .into_value()
            .map(|()| "forwarded".to_string()),
        Direction::Receive => gateway
            .once(channel, |_| {})
            .into_value()
            .map(|()| "armed".to_string()),
        Direction::Invoke => match gateway.invoke(channel, payload).await {
            Ok(Outcome::Forwarded(reply)) => Some(reply.to_string()),
            Ok(Outcome::Denied) => None,
            Err(error) => {
                summary.failed += 1;
                return format!("error: {error}");
            }
        },
    };

    if let Some(rendered) = outcome {
        summary.forwarded += 1;
        rendered
    } else {
        summary.denied += 1;
        "denied".to_string()
    }
}

const fn op_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Send => "send",
        Direction::Invoke => "invoke",
        Direction::Receive => "once",
    }
}
