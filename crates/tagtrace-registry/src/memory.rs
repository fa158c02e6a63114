//! In-memory implementations of registry traits
//!
//! These are suitable for development and testing. Production deployments
//! should use persistent backends.

use crate::device::DeviceRegistry;
use crate::error::{RegistryError, Result};
use crate::ledger::LocationLedger;
use crate::reader::ReaderRegistry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tagtrace_types::{DetectionRecord, Device, DeviceId, Reader, ReaderId, TagId};

/// In-memory registry: devices, readers and the location ledger in one
/// process-local store.
///
/// The ledger map is keyed by device id; `DashMap::insert` takes the shard
/// lock for that key only, which is the per-device upsert atomicity the
/// `LocationLedger` contract requires. Detections for distinct devices land
/// on independent entries and never contend beyond shard granularity.
pub struct InMemoryRegistry {
    devices: DashMap<DeviceId, Device>,
    by_tag: DashMap<TagId, DeviceId>,
    readers: DashMap<ReaderId, Reader>,
    locations: DashMap<DeviceId, DetectionRecord>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            devices: DashMap::new(),
            by_tag: DashMap::new(),
            readers: DashMap::new(),
            locations: DashMap::new(),
        }
    }

    /// Register a device. Fails if the id or tag code is already taken.
    pub fn register_device(&self, device: Device) -> Result<()> {
        if self.devices.contains_key(&device.id) {
            return Err(RegistryError::DeviceAlreadyExists(device.id));
        }
        if self.by_tag.contains_key(&device.tag_id) {
            return Err(RegistryError::DuplicateTag(device.tag_id));
        }

        self.by_tag.insert(device.tag_id.clone(), device.id.clone());
        self.devices.insert(device.id.clone(), device);
        Ok(())
    }

    /// Register a reader. Fails if the id is already taken.
    pub fn register_reader(&self, reader: Reader) -> Result<()> {
        if self.readers.contains_key(&reader.id) {
            return Err(RegistryError::ReaderAlreadyExists(reader.id));
        }
        self.readers.insert(reader.id.clone(), reader);
        Ok(())
    }

    /// Remove a device. Cascades to its tag index entry and ledger record.
    pub fn remove_device(&self, id: &DeviceId) -> Result<bool> {
        match self.devices.remove(id) {
            Some((_, device)) => {
                self.by_tag.remove(&device.tag_id);
                self.locations.remove(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a reader. Ledger records referencing it are left in place;
    /// they expire out of any presence view and are overwritten by the
    /// device's next detection.
    pub fn remove_reader(&self, id: &ReaderId) -> Result<bool> {
        Ok(self.readers.remove(id).is_some())
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceRegistry for InMemoryRegistry {
    async fn find_device_by_tag(&self, tag: &TagId) -> Result<Option<Device>> {
        let Some(device_id) = self.by_tag.get(tag).map(|id| id.clone()) else {
            return Ok(None);
        };
        Ok(self.devices.get(&device_id).map(|d| d.clone()))
    }

    async fn get_device(&self, id: &DeviceId) -> Result<Option<Device>> {
        Ok(self.devices.get(id).map(|d| d.clone()))
    }

    async fn list_devices(&self) -> Result<Vec<Device>> {
        Ok(self.devices.iter().map(|d| d.value().clone()).collect())
    }
}

#[async_trait]
impl ReaderRegistry for InMemoryRegistry {
    async fn get_reader(&self, id: &ReaderId) -> Result<Option<Reader>> {
        Ok(self.readers.get(id).map(|r| r.clone()))
    }

    async fn list_readers(&self) -> Result<Vec<Reader>> {
        Ok(self.readers.iter().map(|r| r.value().clone()).collect())
    }
}

#[async_trait]
impl LocationLedger for InMemoryRegistry {
    async fn upsert_detection(
        &self,
        device_id: DeviceId,
        reader_id: ReaderId,
        detected_at: DateTime<Utc>,
    ) -> Result<DetectionRecord> {
        let record = DetectionRecord::new(device_id.clone(), reader_id, detected_at);
        self.locations.insert(device_id, record.clone());
        Ok(record)
    }

    async fn get_detection(&self, device_id: &DeviceId) -> Result<Option<DetectionRecord>> {
        Ok(self.locations.get(device_id).map(|r| r.clone()))
    }

    async fn list_detections(
        &self,
        reader_id: &ReaderId,
        since: DateTime<Utc>,
    ) -> Result<Vec<DetectionRecord>> {
        let mut records: Vec<DetectionRecord> = self
            .locations
            .iter()
            .filter(|r| &r.reader_id == reader_id && r.detected_at >= since)
            .map(|r| r.value().clone())
            .collect();

        // Stable scan order keeps recomputed views comparable.
        records.sort_by(|a, b| a.device_id.as_str().cmp(b.device_id.as_str()));
        Ok(records)
    }

    async fn count_detections(&self) -> Result<usize> {
        Ok(self.locations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn registry_with_device(id: &str, tag: &str) -> InMemoryRegistry {
        let registry = InMemoryRegistry::new();
        registry
            .register_device(Device::new(id, tag, "Test device"))
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_find_device_by_tag() {
        let registry = registry_with_device("dev-1", "tag-1");

        let found = registry
            .find_device_by_tag(&TagId::new("tag-1"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, DeviceId::new("dev-1"));

        let missing = registry
            .find_device_by_tag(&TagId::new("tag-2"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_tag_rejected() {
        let registry = registry_with_device("dev-1", "tag-1");

        let err = registry
            .register_device(Device::new("dev-2", "tag-1", "Clone"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag(_)));
    }

    #[tokio::test]
    async fn test_upsert_replaces_record() {
        let registry = registry_with_device("dev-1", "tag-1");
        let t0 = Utc::now();

        registry
            .upsert_detection(DeviceId::new("dev-1"), ReaderId::new("dock-a"), t0)
            .await
            .unwrap();
        registry
            .upsert_detection(
                DeviceId::new("dev-1"),
                ReaderId::new("dock-b"),
                t0 + Duration::seconds(1),
            )
            .await
            .unwrap();

        assert_eq!(registry.count_detections().await.unwrap(), 1);
        let record = registry
            .get_detection(&DeviceId::new("dev-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.reader_id, ReaderId::new("dock-b"));
        assert_eq!(record.detected_at, t0 + Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_last_write_wins_ignores_timestamp_order() {
        // Submission order governs, not timestamp order: a late-arriving
        // detection with an older timestamp still replaces the record.
        let registry = registry_with_device("dev-1", "tag-1");
        let t0 = Utc::now();

        registry
            .upsert_detection(DeviceId::new("dev-1"), ReaderId::new("dock-a"), t0)
            .await
            .unwrap();
        registry
            .upsert_detection(
                DeviceId::new("dev-1"),
                ReaderId::new("dock-b"),
                t0 - Duration::seconds(30),
            )
            .await
            .unwrap();

        let record = registry
            .get_detection(&DeviceId::new("dev-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.reader_id, ReaderId::new("dock-b"));
        assert_eq!(record.detected_at, t0 - Duration::seconds(30));
    }

    #[tokio::test]
    async fn test_list_detections_filters_reader_and_since() {
        let registry = InMemoryRegistry::new();
        let now = Utc::now();

        registry
            .upsert_detection(DeviceId::new("dev-1"), ReaderId::new("dock-a"), now)
            .await
            .unwrap();
        registry
            .upsert_detection(DeviceId::new("dev-2"), ReaderId::new("dock-b"), now)
            .await
            .unwrap();
        registry
            .upsert_detection(
                DeviceId::new("dev-3"),
                ReaderId::new("dock-a"),
                now - Duration::minutes(5),
            )
            .await
            .unwrap();

        let records = registry
            .list_detections(&ReaderId::new("dock-a"), now - Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].device_id, DeviceId::new("dev-1"));
    }

    #[tokio::test]
    async fn test_remove_device_cascades_to_ledger() {
        let registry = registry_with_device("dev-1", "tag-1");
        registry
            .upsert_detection(DeviceId::new("dev-1"), ReaderId::new("dock-a"), Utc::now())
            .await
            .unwrap();

        assert!(registry.remove_device(&DeviceId::new("dev-1")).unwrap());
        assert_eq!(registry.count_detections().await.unwrap(), 0);
        assert!(registry
            .find_device_by_tag(&TagId::new("tag-1"))
            .await
            .unwrap()
            .is_none());
    }
}
