//! Core types for the remote mirror.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::SessionKind;
use crate::villain::VillainKey;

/// Mirrorable record type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorEventKind {
    SessionCompleted,
    VillainDefeated,
}

impl MirrorEventKind {
    /// Record collection on the data service.
    pub fn record_table(&self) -> &'static str {
        match self {
            MirrorEventKind::SessionCompleted => "sessions",
            MirrorEventKind::VillainDefeated => "villain_defeats",
        }
    }
}

/// A durable per-user record ready for upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorEvent {
    /// Unique identifier, also the debounce key.
    pub id: String,
    pub kind: MirrorEventKind,
    pub user_id: String,
    /// JSON payload for the record body.
    pub data: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

impl MirrorEvent {
    /// A completed journal/meditation session.
    pub fn session_completed(
        user_id: &str,
        kind: SessionKind,
        session_date: NaiveDate,
        duration_min: u64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: MirrorEventKind::SessionCompleted,
            user_id: user_id.to_string(),
            data: serde_json::json!({
                "session_type": kind.as_str(),
                "session_date": session_date.format("%Y-%m-%d").to_string(),
                "duration_min": duration_min,
            }),
            recorded_at: Utc::now(),
        }
    }

    /// A villain defeat, with the running defeat total for the profile.
    pub fn villain_defeated(user_id: &str, villain: VillainKey, total_defeats: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: MirrorEventKind::VillainDefeated,
            user_id: user_id.to_string(),
            data: serde_json::json!({
                "villain": villain.as_str(),
                "total_defeats": total_defeats,
            }),
            recorded_at: Utc::now(),
        }
    }
}

/// Current mirror status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorStatus {
    pub last_mirror_at: Option<DateTime<Utc>>,
    pub pending_count: usize,
}

/// Mirror error types.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Data service returned HTTP {status}")]
    Http { status: u16 },

    #[error("Mirror is not configured")]
    Disabled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_event_payload() {
        let event = MirrorEvent::session_completed(
            "u1",
            SessionKind::Meditation,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            10,
        );
        assert_eq!(event.kind, MirrorEventKind::SessionCompleted);
        assert_eq!(event.user_id, "u1");
        assert_eq!(event.data["session_type"], "meditation");
        assert_eq!(event.data["session_date"], "2024-06-01");
        assert!(!event.id.is_empty());
    }

    #[test]
    fn test_defeat_event_payload() {
        let event = MirrorEvent::villain_defeated("u1", VillainKey::Doubt, 3);
        assert_eq!(event.kind.record_table(), "villain_defeats");
        assert_eq!(event.data["villain"], "doubt");
        assert_eq!(event.data["total_defeats"], 3);
    }
}
