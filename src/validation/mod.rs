//! Cross-field validation of devices and their nodes.
//!
//! Failures never surface as errors: every checked field gets a flag and
//! the form blocks submission until the aggregate is valid.

use crate::catalog::Catalog;
use crate::config::ValidationLimits;
use crate::protocols::PluginRegistry;

pub mod device;
pub mod node;

pub use device::{update_device_validation, DeviceValidation};
pub use node::{get_all_nodes_validation, update_nodes_validation, NodeSections, NodeValidation};

/// Everything the checks look things up in
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub catalog: &'a Catalog,
    pub registry: &'a PluginRegistry,
    pub limits: &'a ValidationLimits,
}

impl<'a> ValidationContext<'a> {
    pub fn new(catalog: &'a Catalog, registry: &'a PluginRegistry, limits: &'a ValidationLimits) -> Self {
        ValidationContext { catalog, registry, limits }
    }
}
