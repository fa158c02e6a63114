//! Registered devices

use crate::ids::{DeviceId, TagId};
use serde::{Deserialize, Serialize};

/// A physical device carrying an RFID tag.
///
/// Devices are created and deleted by the registry; the presence core only
/// reads them, either by tag code on ingest or by id when building a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Registry-assigned identifier
    pub id: DeviceId,

    /// Tag code, unique across devices
    pub tag_id: TagId,

    /// Display name
    pub name: String,

    /// Photo URL, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Device {
    /// Create a device with the minimum required fields.
    pub fn new(id: impl Into<DeviceId>, tag_id: impl Into<TagId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_id: tag_id.into(),
            name: name.into(),
            photo: None,
            description: None,
        }
    }

    /// Attach a photo URL.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
