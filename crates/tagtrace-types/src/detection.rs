//! Ledger entries

use crate::ids::{DeviceId, ReaderId};
use serde::{Deserialize, Serialize};

/// The location ledger's record of a device's most recent detection.
///
/// The ledger holds at most one record per device: a new detection for the
/// same device replaces the reader and timestamp rather than appending. It
/// is a current-state store, not an event log, so records carry no sequence
/// numbers and are never deleted by the presence core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// The detected device
    pub device_id: DeviceId,

    /// Reader that saw the device last
    pub reader_id: ReaderId,

    /// When the detection happened (server clock unless the source supplied
    /// its own timestamp)
    pub detected_at: chrono::DateTime<chrono::Utc>,
}

impl DetectionRecord {
    pub fn new(
        device_id: impl Into<DeviceId>,
        reader_id: impl Into<ReaderId>,
        detected_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            reader_id: reader_id.into(),
            detected_at,
        }
    }
}
