//! Registered RFID readers

use crate::ids::ReaderId;
use serde::{Deserialize, Serialize};

/// A fixed RFID reader installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reader {
    /// Installer-assigned identifier
    pub id: ReaderId,

    /// Display name
    pub name: String,

    /// Free-text location description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Reader {
    pub fn new(id: impl Into<ReaderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
