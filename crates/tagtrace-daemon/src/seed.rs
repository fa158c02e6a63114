//! Registry seeding
//!
//! The in-memory registry starts empty. In deployments where the real
//! registry service is not wired in, a JSON seed file provides the reader
//! and device records the presence core will resolve against.

use crate::error::{DaemonError, DaemonResult};
use serde::Deserialize;
use std::path::Path;
use tagtrace_registry::InMemoryRegistry;
use tagtrace_types::{Device, Reader};

/// Seed file contents
#[derive(Debug, Deserialize)]
pub struct RegistrySeed {
    #[serde(default)]
    pub readers: Vec<Reader>,

    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Load a seed file from disk.
pub fn load_seed(path: impl AsRef<Path>) -> DaemonResult<RegistrySeed> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DaemonError::Seed(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| DaemonError::Seed(format!("{}: {}", path.display(), e)))
}

/// Apply a seed to the registry, returning (readers, devices) counts.
pub fn apply_seed(registry: &InMemoryRegistry, seed: RegistrySeed) -> DaemonResult<(usize, usize)> {
    let reader_count = seed.readers.len();
    let device_count = seed.devices.len();

    for reader in seed.readers {
        registry.register_reader(reader)?;
    }
    for device in seed.devices {
        registry.register_device(device)?;
    }

    Ok((reader_count, device_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seed_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "readers": [{{"id": "dock-a", "name": "Dock A"}}],
                "devices": [{{"id": "dev-1", "tag_id": "tag-1", "name": "Forklift"}}]
            }}"#
        )
        .unwrap();

        let seed = load_seed(file.path()).unwrap();
        let registry = InMemoryRegistry::new();
        let (readers, devices) = apply_seed(&registry, seed).unwrap();
        assert_eq!((readers, devices), (1, 1));
    }

    #[test]
    fn test_duplicate_tag_in_seed_fails() {
        let registry = InMemoryRegistry::new();
        let seed = RegistrySeed {
            readers: vec![],
            devices: vec![
                Device::new("dev-1", "tag-1", "One"),
                Device::new("dev-2", "tag-1", "Two"),
            ],
        };
        assert!(apply_seed(&registry, seed).is_err());
    }

    #[test]
    fn test_missing_file_is_seed_error() {
        let err = load_seed("/no/such/seed.json").unwrap_err();
        assert!(matches!(err, DaemonError::Seed(_)));
    }
}
