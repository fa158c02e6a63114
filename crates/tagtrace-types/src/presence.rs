//! Derived presence projections
//!
//! Nothing in this module is persisted. A `ReaderView` is recomputed from
//! the ledger on every wake-up of a live session and compared structurally
//! against the previously emitted view, so these types deliberately carry no
//! "generated at" wall-clock field — two views over identical ledger state
//! must compare equal.

use crate::device::Device;
use crate::reader::Reader;
use serde::{Deserialize, Serialize};

/// One device currently present at a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceEntry {
    /// Device metadata, denormalized for the client
    pub device: Device,

    /// Timestamp of the detection that put the device here
    pub last_seen: chrono::DateTime<chrono::Utc>,
}

/// The full per-reader view pushed to live clients.
///
/// Every emission carries the whole view; clients replace their state rather
/// than patching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderView {
    /// Reader metadata
    pub reader: Reader,

    /// Devices within the presence window, one entry per device
    pub devices: Vec<PresenceEntry>,
}
