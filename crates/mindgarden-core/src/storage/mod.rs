mod config;
pub mod database;
pub mod kv;

pub use config::{Config, GamificationConfig, MirrorConfig, ProfileConfig};
pub use database::{Database, SessionKind, Stats};
pub use kv::{KeyValueStore, MemoryStore};

use std::path::PathBuf;

/// Returns `~/.config/mindgarden[-dev]/` based on MINDGARDEN_ENV.
///
/// Set MINDGARDEN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDGARDEN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mindgarden-dev")
    } else {
        base_dir.join("mindgarden")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
