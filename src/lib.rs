//! Meter configuration library
//!
//! This library validates and normalizes the configuration of energy meters
//! read over Modbus RTU or OPC UA, from the editable form state up to the
//! typed payload stored for a device.

pub mod catalog;
pub mod check;
pub mod config;
pub mod editing;
pub mod grammar;
pub mod history;
pub mod models;
pub mod protocols;
pub mod validation;

// Re-export common types for easier access
pub use catalog::{Catalog, CatalogVariable};
pub use check::{check_device_file, check_device_path, CheckError, CheckReport};
pub use config::{Config, ConfigError, ValidationLimits};
pub use editing::EditingState;
pub use models::{Device, EditableDevice, EditableNode, MeterType, Node, NodeType, Phase, Protocol};
pub use protocols::{PluginRegistry, ProtocolError, ProtocolPlugin};
pub use validation::ValidationContext;
