//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::bus::ChangeBus;
use crate::config::DaemonConfig;
use crate::error::DaemonResult;
use crate::ingest::DetectionIngest;
use crate::presence::PresenceSettings;
use crate::seed;
use std::sync::Arc;
use tagtrace_registry::InMemoryRegistry;
use tokio::net::TcpListener;

/// TagTrace daemon server
pub struct Server {
    config: DaemonConfig,
    registry: Arc<InMemoryRegistry>,
    bus: ChangeBus,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let registry = Arc::new(InMemoryRegistry::new());

        if let Some(path) = &config.registry.seed {
            let loaded = seed::load_seed(path)?;
            let (readers, devices) = seed::apply_seed(&registry, loaded)?;
            tracing::info!(readers, devices, path = %path, "Registry seeded");
        }

        let bus = ChangeBus::new(config.bus.capacity);

        Ok(Self {
            config,
            registry,
            bus,
        })
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let ingest = Arc::new(DetectionIngest::new(
            self.registry.clone(),
            self.bus.clone(),
        ));
        let state = AppState::new(
            self.registry.clone(),
            ingest,
            self.bus.clone(),
            PresenceSettings::from(&self.config.presence),
        );

        let app = create_router(state, self.config.server.enable_cors);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("TagTrace daemon listening on {}", addr);
        tracing::info!(
            presence_window_ms = self.config.presence.window_ms,
            recompute_interval_ms = self.config.presence.recompute_interval_ms,
            "Presence timing"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::error::DaemonError::Server(e.to_string()))?;

        tracing::info!("TagTrace daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
