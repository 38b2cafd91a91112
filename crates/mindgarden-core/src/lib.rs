//! # Mindgarden Core Library
//!
//! This library provides the core business logic for Mindgarden, a
//! journaling and meditation companion with a gamified progress layer. It
//! implements a CLI-first philosophy where all operations are available via
//! a standalone CLI binary, with any GUI shell being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Streak**: calendar-day activity streak with at-most-once-per-day
//!   increments and gap resets
//! - **Villain**: the active adversary's depleting health pool and the
//!   append-only defeat history
//! - **Gates**: date-scoped one-shot flags for once-a-day UI moments
//! - **Storage**: SQLite key-value and session storage, TOML configuration
//! - **Mirror**: best-effort one-way upload of sessions and defeats to a
//!   remote data service
//!
//! The three gamification components never call each other; the caller (the
//! CLI, or a GUI shell) coordinates them per user action. Each component
//! receives its store handle at construction time.
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: consecutive-day activity streak
//! - [`VillainProgressEngine`]: adversary health state machine
//! - [`DailyGateKeeper`]: once-per-day gate flags
//! - [`Database`]: session history, statistics, and key-value persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod garden;
pub mod gate;
pub mod mirror;
pub mod storage;
pub mod streak;
pub mod villain;

pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use gate::{DailyGateKeeper, GatePurpose};
pub use mirror::{MirrorClient, MirrorError, MirrorEvent, MirrorEventKind, MirrorQueue, MirrorStatus};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, SessionKind, Stats};
pub use streak::StreakTracker;
pub use villain::{VillainInfo, VillainKey, VillainProgressEngine, VillainState, DEFAULT_DAMAGE, MAX_HEALTH};
