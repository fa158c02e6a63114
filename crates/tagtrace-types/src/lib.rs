//! TagTrace Types - Core types for RFID presence tracking
//!
//! TagTrace tracks physical tags (devices) as they pass RFID readers and
//! derives, per reader, the set of devices currently present.
//!
//! ## Architectural Boundaries
//!
//! - **Registry** owns: reader/device metadata and the durable location ledger
//! - **Daemon** owns: detection ingest, change fan-out, presence derivation,
//!   live viewer sessions
//!
//! ## Key Concepts
//!
//! - **Device**: a registered tag with display metadata
//! - **Reader**: a fixed RFID reader devices pass by
//! - **DetectionRecord**: the single live ledger entry per device (last
//!   reader + last seen time)
//! - **PresenceEntry / ReaderView**: read-time projections, recomputed on
//!   demand and never persisted

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod detection;
pub mod device;
pub mod ids;
pub mod presence;
pub mod reader;

// Re-export main types
pub use detection::DetectionRecord;
pub use device::Device;
pub use ids::{DeviceId, ReaderId, TagId};
pub use presence::{PresenceEntry, ReaderView};
pub use reader::Reader;
