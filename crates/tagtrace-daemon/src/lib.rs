//! TagTrace Daemon library
//!
//! This module provides the core components of the presence daemon:
//! - Change bus for detection fan-out
//! - Detection ingest
//! - Presence views and live viewer sessions
//! - REST/SSE API handlers
//! - Server lifecycle management

pub mod api;
pub mod bus;
pub mod config;
pub mod error;
pub mod ingest;
pub mod presence;
pub mod seed;
pub mod server;

pub use bus::{ChangeBus, ChangeSignal, ChangeSubscription};
pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, IngestError};
pub use ingest::DetectionIngest;
pub use presence::{compute_presence, live_view_stream, reader_view, PresenceSettings};
pub use server::Server;
