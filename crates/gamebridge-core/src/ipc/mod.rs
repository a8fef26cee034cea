//! In-process message-passing transport.
//!
//! [`channel`] creates a connected pair: the [`RendererTransport`] handed to a
//! bridge gateway and the [`MainEndpoint`] owned by the main process.
//! Sends travel on an unbounded queue and are never dropped while the main
//! end is alive. Invokes travel on a bounded queue, so a renderer with too
//! many outstanding invokes waits for room. Replies come back over one-shot
//! channels. Main to renderer messages go to one-shot registrations armed by
//! the renderer.

mod main_end;
mod registry;
mod renderer;
mod router;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

pub use main_end::{Emitter, MainEndpoint, MainMessage, Responder};
pub use renderer::RendererTransport;
pub use router::MainRouter;

use crate::message::SenderMeta;
use registry::ListenerRegistry;

/// Default capacity of the renderer to main invoke queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// Create a connected renderer/main transport pair.
pub fn channel(capacity: usize) -> (RendererTransport, MainEndpoint) {
    let (send_tx, send_rx) = mpsc::unbounded_channel();
    let (invoke_tx, invoke_rx) = mpsc::channel(capacity.max(1));
    let listeners = Arc::new(ListenerRegistry::default());
    let renderer_meta = SenderMeta {
        process_id: std::process::id(),
        frame_id: NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed),
    };
    (
        RendererTransport::new(send_tx, invoke_tx, Arc::clone(&listeners), renderer_meta),
        MainEndpoint::new(send_rx, invoke_rx, listeners, SenderMeta::main_process()),
    )
}
