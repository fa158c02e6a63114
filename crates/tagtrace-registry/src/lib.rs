//! TagTrace Registry - Registry traits and implementations
//!
//! This crate is the boundary between the presence core and the system of
//! record for readers, devices and detections:
//!
//! - **DeviceRegistry**: resolves devices by tag code or id
//! - **ReaderRegistry**: resolves reader metadata
//! - **LocationLedger**: the last-write-wins mapping from device to its most
//!   recent detection
//!
//! ## In-Memory vs Persistent
//!
//! The crate provides in-memory implementations suitable for development and
//! testing. Production deployments should use persistent backends that
//! implement the same traits; the presence core only requires that
//! `upsert_detection` is atomic per device key.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod device;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod reader;

// Re-exports
pub use device::DeviceRegistry;
pub use error::{RegistryError, Result};
pub use ledger::LocationLedger;
pub use memory::InMemoryRegistry;
pub use reader::ReaderRegistry;

/// Combined registry trait for consumers that need the whole collaborator.
pub trait Registry: DeviceRegistry + ReaderRegistry + LocationLedger + Send + Sync {}

impl<T> Registry for T where T: DeviceRegistry + ReaderRegistry + LocationLedger + Send + Sync {}
