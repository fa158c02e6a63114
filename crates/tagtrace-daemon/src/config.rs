//! Configuration for tagtrace-daemon

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Presence timing configuration
    #[serde(default)]
    pub presence: PresenceConfig,

    /// Change bus configuration
    #[serde(default)]
    pub bus: BusConfig,

    /// Registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".parse().unwrap(),
            enable_cors: true,
        }
    }
}

/// Presence timing configuration
///
/// `window_ms` and `recompute_interval_ms` are the two externally tunable
/// constants governing staleness and refresh cadence. The ledger scan window
/// only bounds read volume and must cover the presence window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// How long after its last detection a device counts as present
    #[serde(default = "default_presence_window_ms")]
    pub window_ms: u64,

    /// Wall-clock recompute cadence of live sessions
    #[serde(default = "default_recompute_interval_ms")]
    pub recompute_interval_ms: u64,

    /// Coarse ledger query window
    #[serde(default = "default_scan_window_secs")]
    pub ledger_scan_window_secs: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            window_ms: default_presence_window_ms(),
            recompute_interval_ms: default_recompute_interval_ms(),
            ledger_scan_window_secs: default_scan_window_secs(),
        }
    }
}

/// Change bus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Per-subscriber signal queue depth before coalescing kicks in
    #[serde(default = "default_bus_capacity")]
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: default_bus_capacity(),
        }
    }
}

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Optional JSON seed file with readers and devices, loaded into the
    /// in-memory registry at startup
    #[serde(default)]
    pub seed: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_presence_window_ms() -> u64 {
    15_000
}

fn default_recompute_interval_ms() -> u64 {
    500
}

fn default_scan_window_secs() -> u64 {
    60
}

fn default_bus_capacity() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from defaults, an optional file and `TAGTRACE_*`
    /// environment variables, in that order.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with TAGTRACE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("TAGTRACE")
                .separator("_")
                .try_parsing(true),
        );

        let config: DaemonConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would violate presence semantics.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.presence.window_ms == 0 {
            return Err(config::ConfigError::Message(
                "presence.window_ms must be positive".into(),
            ));
        }
        if self.presence.recompute_interval_ms == 0 {
            return Err(config::ConfigError::Message(
                "presence.recompute_interval_ms must be positive".into(),
            ));
        }
        if self.bus.capacity == 0 {
            return Err(config::ConfigError::Message(
                "bus.capacity must be positive".into(),
            ));
        }
        // The scan window is an optimization bound; tighter than the
        // presence window it would silently drop live entries.
        if self.presence.ledger_scan_window_secs * 1000 < self.presence.window_ms {
            return Err(config::ConfigError::Message(format!(
                "presence.ledger_scan_window_secs ({}s) must cover presence.window_ms ({}ms)",
                self.presence.ledger_scan_window_secs, self.presence.window_ms
            )));
        }
        Ok(())
    }
}
