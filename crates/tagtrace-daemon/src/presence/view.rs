//! Per-reader presence views
//!
//! `compute_presence` is the authoritative staleness filter; everything
//! upstream of it (the ledger scan window) only bounds read volume.

use crate::config::PresenceConfig;
use chrono::{DateTime, Utc};
use tagtrace_registry::{Registry, Result as RegistryResult};
use tagtrace_types::{DetectionRecord, Device, PresenceEntry, ReaderId, ReaderView};

/// Resolved presence timing, shared by snapshot and live-session paths.
#[derive(Debug, Clone)]
pub struct PresenceSettings {
    /// Entries at least this old are not present
    pub window: chrono::Duration,

    /// Coarse ledger query bound; never tighter than `window`
    pub scan_window: chrono::Duration,

    /// Live-session wall-clock recompute cadence
    pub recompute_interval: std::time::Duration,
}

impl From<&PresenceConfig> for PresenceSettings {
    fn from(config: &PresenceConfig) -> Self {
        Self {
            window: chrono::Duration::milliseconds(config.window_ms as i64),
            scan_window: chrono::Duration::seconds(config.ledger_scan_window_secs as i64),
            recompute_interval: std::time::Duration::from_millis(config.recompute_interval_ms),
        }
    }
}

/// Project ledger records into the current presence set.
///
/// Pure over its inputs: an entry is present iff `now - detected_at` is
/// strictly inside `window`. An entry aged exactly `window` is already out.
/// Output order follows input order; per-device uniqueness is inherited from
/// the ledger's one-record-per-device invariant.
pub fn compute_presence(
    detections: &[(DetectionRecord, Device)],
    now: DateTime<Utc>,
    window: chrono::Duration,
) -> Vec<PresenceEntry> {
    detections
        .iter()
        .filter(|(record, _)| now.signed_duration_since(record.detected_at) < window)
        .map(|(record, device)| PresenceEntry {
            device: device.clone(),
            last_seen: record.detected_at,
        })
        .collect()
}

/// Build the full view for one reader, or `None` if the reader is not
/// registered.
///
/// A ledger record whose device metadata is missing is dropped with a
/// warning; a half-deleted device must not take the whole view down.
pub async fn reader_view(
    registry: &dyn Registry,
    reader_id: &ReaderId,
    settings: &PresenceSettings,
    now: DateTime<Utc>,
) -> RegistryResult<Option<ReaderView>> {
    let Some(reader) = registry.get_reader(reader_id).await? else {
        return Ok(None);
    };

    let records = registry
        .list_detections(reader_id, now - settings.scan_window)
        .await?;

    let mut joined = Vec::with_capacity(records.len());
    for record in records {
        match registry.get_device(&record.device_id).await? {
            Some(device) => joined.push((record, device)),
            None => {
                tracing::warn!(
                    device_id = %record.device_id,
                    reader_id = %reader_id,
                    "Dropping ledger entry without device metadata"
                );
            }
        }
    }

    let devices = compute_presence(&joined, now, settings.window);
    Ok(Some(ReaderView { reader, devices }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tagtrace_registry::{InMemoryRegistry, LocationLedger};
    use tagtrace_types::{DeviceId, Reader};

    fn entry(age_ms: i64, now: DateTime<Utc>) -> (DetectionRecord, Device) {
        (
            DetectionRecord::new("dev-1", "dock-a", now - chrono::Duration::milliseconds(age_ms)),
            Device::new("dev-1", "tag-1", "Forklift"),
        )
    }

    #[test]
    fn test_entry_inside_window_included() {
        let now = Utc::now();
        let window = chrono::Duration::milliseconds(15_000);

        let present = compute_presence(&[entry(14_999, now)], now, window);
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].device.id, DeviceId::new("dev-1"));
    }

    #[test]
    fn test_entry_at_window_boundary_excluded() {
        let now = Utc::now();
        let window = chrono::Duration::milliseconds(15_000);

        let present = compute_presence(&[entry(15_000, now)], now, window);
        assert!(present.is_empty());
    }

    #[test]
    fn test_mixed_ages() {
        let now = Utc::now();
        let window = chrono::Duration::milliseconds(15_000);
        let detections = vec![
            (
                DetectionRecord::new("dev-1", "dock-a", now - chrono::Duration::seconds(5)),
                Device::new("dev-1", "tag-1", "Forklift"),
            ),
            (
                DetectionRecord::new("dev-2", "dock-a", now - chrono::Duration::seconds(20)),
                Device::new("dev-2", "tag-2", "Pallet jack"),
            ),
        ];

        let present = compute_presence(&detections, now, window);
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].device.id, DeviceId::new("dev-1"));
        assert_eq!(
            present[0].last_seen,
            now - chrono::Duration::seconds(5)
        );
    }

    #[tokio::test]
    async fn test_reader_view_unknown_reader_is_none() {
        let registry = Arc::new(InMemoryRegistry::new());
        let settings = PresenceSettings::from(&PresenceConfig::default());

        let view = reader_view(
            registry.as_ref(),
            &ReaderId::new("nowhere"),
            &settings,
            Utc::now(),
        )
        .await
        .unwrap();
        assert!(view.is_none());
    }

    #[tokio::test]
    async fn test_reader_view_drops_entry_without_device() {
        let registry = Arc::new(InMemoryRegistry::new());
        registry
            .register_reader(Reader::new("dock-a", "Dock A"))
            .unwrap();
        let now = Utc::now();

        // A ledger record for a device the registry no longer knows.
        registry
            .upsert_detection(DeviceId::new("ghost"), ReaderId::new("dock-a"), now)
            .await
            .unwrap();

        let settings = PresenceSettings::from(&PresenceConfig::default());
        let view = reader_view(registry.as_ref(), &ReaderId::new("dock-a"), &settings, now)
            .await
            .unwrap()
            .unwrap();
        assert!(view.devices.is_empty());
    }
}
