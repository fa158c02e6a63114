//! Device registry trait
//!
//! Devices are created and deleted outside the presence core; this trait is
//! the read-side the core consumes.

use crate::error::Result;
use async_trait::async_trait;
use tagtrace_types::{Device, DeviceId, TagId};

/// Registry of known devices
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// Resolve a device by its tag code. `Ok(None)` means the tag is not
    /// registered.
    async fn find_device_by_tag(&self, tag: &TagId) -> Result<Option<Device>>;

    /// Get a device by id
    async fn get_device(&self, id: &DeviceId) -> Result<Option<Device>>;

    /// List all devices
    async fn list_devices(&self) -> Result<Vec<Device>>;
}
