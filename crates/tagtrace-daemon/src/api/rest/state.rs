//! Application state for API handlers

use crate::bus::ChangeBus;
use crate::ingest::DetectionIngest;
use crate::presence::PresenceSettings;
use std::sync::Arc;
use tagtrace_registry::Registry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registry collaborator (devices, readers, location ledger)
    pub registry: Arc<dyn Registry>,

    /// Detection ingest service
    pub ingest: Arc<DetectionIngest>,

    /// Change bus
    pub bus: ChangeBus,

    /// Presence timing
    pub presence: PresenceSettings,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        registry: Arc<dyn Registry>,
        ingest: Arc<DetectionIngest>,
        bus: ChangeBus,
        presence: PresenceSettings,
    ) -> Self {
        Self {
            registry,
            ingest,
            bus,
            presence,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
