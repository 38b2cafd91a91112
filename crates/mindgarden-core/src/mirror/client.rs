//! HTTP client for the remote data service.
//!
//! The mirror is one-way and best-effort: local state is the source of
//! truth, and nothing in the core waits on the service to make progress.

use crate::mirror::types::{MirrorError, MirrorEvent};
use crate::storage::MirrorConfig;

/// Data service client for mirror uploads.
pub struct MirrorClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl MirrorClient {
    /// Create a client for an explicit endpoint.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the mirror config section.
    ///
    /// # Errors
    /// Returns [`MirrorError::Disabled`] when mirroring is off or no
    /// endpoint is configured.
    pub fn from_config(config: &MirrorConfig) -> Result<Self, MirrorError> {
        if !config.enabled || config.base_url.is_empty() {
            return Err(MirrorError::Disabled);
        }
        Ok(Self::new(config.base_url.clone(), config.api_key.clone()))
    }

    /// Upload one record to its collection.
    pub async fn push(&self, event: &MirrorEvent) -> Result<(), MirrorError> {
        let url = format!(
            "{}/records/{}",
            self.base_url.trim_end_matches('/'),
            event.kind.record_table()
        );
        let mut request = self.client.post(&url).json(event);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MirrorError::Http {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
