//! Best-effort one-way mirror to the remote data service.
//!
//! Session completions and villain defeats are mirrored into durable
//! per-user records when the service is reachable. Local state never
//! depends on the mirror succeeding: failures are warned and swallowed,
//! and the event is parked in an offline queue for a later flush.

mod client;
mod queue;
mod types;

pub use client::MirrorClient;
pub use queue::MirrorQueue;
pub use types::{MirrorError, MirrorEvent, MirrorEventKind, MirrorStatus};

/// Maximum events uploaded per flush.
const FLUSH_BATCH: usize = 25;

/// Upload queued events whose debounce has elapsed; failed uploads are
/// re-enqueued. Returns the number pushed.
pub async fn flush_queue(queue: &mut MirrorQueue, client: &MirrorClient) -> usize {
    let mut pushed = 0;
    for event in queue.drain_up_to(FLUSH_BATCH) {
        match client.push(&event).await {
            Ok(()) => pushed += 1,
            Err(e) => {
                eprintln!("Warning: mirror push failed for {}: {e}", event.id);
                queue.enqueue(event);
            }
        }
    }
    pushed
}
