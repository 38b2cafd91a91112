//! Persistent queue for mirror events that could not be uploaded.

use crate::mirror::types::MirrorEvent;
use crate::storage::data_dir;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Pending mirror event with debounce timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingEvent {
    event: MirrorEvent,
    debounce_until: DateTime<Utc>,
}

/// Offline queue for batching mirror uploads.
///
/// Events recorded while the data service is unreachable are parked here
/// and retried on the next flush. Keyed by event ID so a re-enqueued event
/// replaces its older copy.
pub struct MirrorQueue {
    pending: HashMap<String, PendingEvent>,
    queue_file: PathBuf,
}

impl MirrorQueue {
    /// Create a queue persisted under the data directory.
    pub fn new() -> Self {
        let data_dir = data_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            pending: HashMap::new(),
            queue_file: data_dir.join("mirror_queue.json"),
        }
    }

    /// Create a queue with a specific file path (for testing).
    pub fn new_with_path(path: PathBuf) -> Self {
        Self {
            pending: HashMap::new(),
            queue_file: path,
        }
    }

    /// Enqueue an event for later upload (with debounce).
    pub fn enqueue(&mut self, event: MirrorEvent) {
        let debounce_until = Utc::now() + Duration::seconds(3);
        self.pending.insert(
            event.id.clone(),
            PendingEvent {
                event,
                debounce_until,
            },
        );
    }

    /// Drain up to `n` events whose debounce has elapsed.
    pub fn drain_up_to(&mut self, n: usize) -> Vec<MirrorEvent> {
        let now = Utc::now();
        let mut ready = Vec::new();
        self.pending.retain(|_, pending| {
            if pending.debounce_until <= now && ready.len() < n {
                ready.push(pending.event.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Persist the queue to disk.
    pub fn persist(&self) -> Result<(), std::io::Error> {
        let data = serde_json::to_string_pretty(&self.pending)?;
        std::fs::write(&self.queue_file, data)?;
        Ok(())
    }

    /// Load the queue from disk; a missing file is an empty queue.
    pub fn load(&mut self) -> Result<(), std::io::Error> {
        if !self.queue_file.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.queue_file)?;
        self.pending = serde_json::from_str(&content)?;
        Ok(())
    }
}

impl Default for MirrorQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SessionKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_event() -> MirrorEvent {
        MirrorEvent::session_completed(
            "u1",
            SessionKind::Journal,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            5,
        )
    }

    #[test]
    fn test_enqueue_replaces_same_id() {
        let temp = TempDir::new().unwrap();
        let mut queue = MirrorQueue::new_with_path(temp.path().join("queue.json"));

        let mut event = sample_event();
        queue.enqueue(event.clone());
        event.data["duration_min"] = serde_json::json!(7);
        queue.enqueue(event);

        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_debounce_holds_fresh_events() {
        let temp = TempDir::new().unwrap();
        let mut queue = MirrorQueue::new_with_path(temp.path().join("queue.json"));
        queue.enqueue(sample_event());

        // Still inside the debounce window.
        assert!(queue.drain_up_to(10).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drain_after_debounce() {
        let temp = TempDir::new().unwrap();
        let mut queue = MirrorQueue::new_with_path(temp.path().join("queue.json"));
        queue.enqueue(sample_event());

        std::thread::sleep(std::time::Duration::from_secs(4));

        let drained = queue.drain_up_to(10);
        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_limit() {
        let temp = TempDir::new().unwrap();
        let mut queue = MirrorQueue::new_with_path(temp.path().join("queue.json"));
        for _ in 0..5 {
            queue.enqueue(sample_event());
        }

        std::thread::sleep(std::time::Duration::from_secs(4));

        let drained = queue.drain_up_to(3);
        assert_eq!(drained.len(), 3);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_persist_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("queue.json");

        let mut queue = MirrorQueue::new_with_path(path.clone());
        let event = sample_event();
        let id = event.id.clone();
        queue.enqueue(event);
        queue.persist().unwrap();

        let mut queue2 = MirrorQueue::new_with_path(path);
        queue2.load().unwrap();
        assert_eq!(queue2.len(), 1);

        std::thread::sleep(std::time::Duration::from_secs(4));
        let drained = queue2.drain_up_to(10);
        assert_eq!(drained[0].id, id);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let mut queue = MirrorQueue::new_with_path(temp.path().join("absent.json"));
        queue.load().unwrap();
        assert!(queue.is_empty());
    }
}
