//! Location ledger trait

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tagtrace_types::{DetectionRecord, DeviceId, ReaderId};

/// The durable device-location ledger.
///
/// Holds at most one record per device. `upsert_detection` must be atomic
/// per device key: concurrent upserts for distinct devices proceed in
/// parallel, concurrent upserts for the same device serialize at the key and
/// resolve last-write-wins by commit order.
#[async_trait]
pub trait LocationLedger: Send + Sync {
    /// Insert or replace the record for `device_id`, returning the stored
    /// record.
    async fn upsert_detection(
        &self,
        device_id: DeviceId,
        reader_id: ReaderId,
        detected_at: DateTime<Utc>,
    ) -> Result<DetectionRecord>;

    /// Get the current record for a device, if any
    async fn get_detection(&self, device_id: &DeviceId) -> Result<Option<DetectionRecord>>;

    /// List records at `reader_id` no older than `since`.
    ///
    /// This is a coarse read-volume bound, not the presence filter; callers
    /// must apply the authoritative window themselves and must never pass a
    /// `since` tighter than that window.
    async fn list_detections(
        &self,
        reader_id: &ReaderId,
        since: DateTime<Utc>,
    ) -> Result<Vec<DetectionRecord>>;

    /// Number of devices with a ledger record
    async fn count_detections(&self) -> Result<usize>;
}
