//! Detection ingest
//!
//! Validates an incoming detection, applies it to the location ledger and
//! publishes exactly one change signal. Ordering invariant: the ledger write
//! completes before the signal is published, so a session waking on the
//! signal always observes the new state.

use crate::bus::ChangeBus;
use crate::error::IngestError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tagtrace_registry::Registry;
use tagtrace_types::{DetectionRecord, ReaderId, TagId};

/// Detection ingest service.
pub struct DetectionIngest {
    registry: Arc<dyn Registry>,
    bus: ChangeBus,
}

impl DetectionIngest {
    pub fn new(registry: Arc<dyn Registry>, bus: ChangeBus) -> Self {
        Self { registry, bus }
    }

    /// Record a detection of `tag_id` at `reader_id`.
    ///
    /// The tag must resolve to a registered device. The reader id is passed
    /// through uninterpreted. A missing timestamp defaults to the server
    /// clock at processing time. On any error the ledger is untouched and no
    /// signal is published.
    pub async fn record(
        &self,
        tag_id: &TagId,
        reader_id: ReaderId,
        detected_at: Option<DateTime<Utc>>,
    ) -> Result<DetectionRecord, IngestError> {
        let device = self
            .registry
            .find_device_by_tag(tag_id)
            .await?
            .ok_or_else(|| IngestError::UnknownDevice(tag_id.clone()))?;

        let detected_at = detected_at.unwrap_or_else(Utc::now);

        let record = self
            .registry
            .upsert_detection(device.id.clone(), reader_id, detected_at)
            .await?;

        // The upsert is durable and visible; now wake the viewers.
        self.bus.publish();

        tracing::debug!(
            device_id = %record.device_id,
            reader_id = %record.reader_id,
            detected_at = %record.detected_at,
            "Detection recorded"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tagtrace_registry::{InMemoryRegistry, LocationLedger};
    use tagtrace_types::{Device, DeviceId};

    fn setup() -> (Arc<InMemoryRegistry>, ChangeBus, DetectionIngest) {
        let registry = Arc::new(InMemoryRegistry::new());
        registry
            .register_device(Device::new("dev-1", "tag-1", "Forklift"))
            .unwrap();
        let bus = ChangeBus::new(16);
        let ingest = DetectionIngest::new(registry.clone(), bus.clone());
        (registry, bus, ingest)
    }

    #[tokio::test]
    async fn test_known_tag_upserts_and_signals() {
        let (registry, bus, ingest) = setup();
        let mut subscription = bus.subscribe();

        let record = ingest
            .record(&TagId::new("tag-1"), ReaderId::new("dock-a"), None)
            .await
            .unwrap();

        assert_eq!(record.device_id, DeviceId::new("dev-1"));
        assert_eq!(registry.count_detections().await.unwrap(), 1);
        assert!(subscription.changed().await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_tag_mutates_nothing_and_signals_nothing() {
        let (registry, bus, ingest) = setup();
        let mut subscription = bus.subscribe();

        let err = ingest
            .record(&TagId::new("tag-unknown"), ReaderId::new("dock-a"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, IngestError::UnknownDevice(_)));
        assert_eq!(registry.count_detections().await.unwrap(), 0);

        let waited =
            tokio::time::timeout(Duration::from_millis(50), subscription.changed()).await;
        assert!(waited.is_err(), "failed ingest must not publish");
    }

    #[tokio::test]
    async fn test_supplied_timestamp_is_stored() {
        let (registry, _bus, ingest) = setup();
        let supplied = Utc::now() - chrono::Duration::seconds(42);

        ingest
            .record(&TagId::new("tag-1"), ReaderId::new("dock-a"), Some(supplied))
            .await
            .unwrap();

        let record = registry
            .get_detection(&DeviceId::new("dev-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.detected_at, supplied);
    }

    #[tokio::test]
    async fn test_missing_timestamp_defaults_to_server_clock() {
        let (registry, _bus, ingest) = setup();
        let before = Utc::now();

        ingest
            .record(&TagId::new("tag-1"), ReaderId::new("dock-a"), None)
            .await
            .unwrap();

        let after = Utc::now();
        let record = registry
            .get_detection(&DeviceId::new("dev-1"))
            .await
            .unwrap()
            .unwrap();
        assert!(record.detected_at >= before && record.detected_at <= after);
    }

    #[tokio::test]
    async fn test_unregistered_reader_id_accepted() {
        // Deliberate leniency: the reader id is not checked against the
        // reader registry.
        let (registry, _bus, ingest) = setup();

        ingest
            .record(&TagId::new("tag-1"), ReaderId::new("no-such-reader"), None)
            .await
            .unwrap();

        assert_eq!(registry.count_detections().await.unwrap(), 1);
    }
}
