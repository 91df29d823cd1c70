use log::debug;
use serde::Serialize;

use super::ValidationContext;
use crate::grammar::validate_device_name;
use crate::models::{EditableDevice, EditableNode};
use crate::protocols::CommunicationValidation;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceValidation {
    pub name: bool,
    pub protocol: bool,
    pub communication_options: bool,
    pub nodes: bool,
    pub communication: CommunicationValidation,
}

impl DeviceValidation {
    pub fn is_valid(&self) -> bool {
        self.name && self.protocol && self.communication_options && self.nodes
    }

    /// Message key of the first failing field
    pub fn first_error(&self) -> Option<&'static str> {
        if !self.name {
            return Some("device.errors.name");
        }
        if !self.protocol {
            return Some("device.errors.protocol");
        }
        if !self.communication_options {
            return Some("device.errors.communication_options");
        }
        if !self.nodes {
            return Some("device.errors.nodes");
        }
        None
    }
}

/// Recompute the device flags. Node flags must be up to date already.
pub fn update_device_validation(device: &mut EditableDevice, nodes: &[EditableNode], ctx: &ValidationContext) {
    let plugin = ctx.registry.get(device.protocol).ok();

    let communication = match plugin {
        Some(p) => p.validate_communication_options(&device.communication_options),
        None => CommunicationValidation::Mismatch,
    };

    /* every node has to be placed in a section the meter type lists */
    let phases = device.meter_type.phases();
    let nodes_valid = nodes.iter().all(|n| n.validation.is_valid() && phases.contains(&n.phase));

    let validation = DeviceValidation {
        name: validate_device_name(&device.name),
        protocol: plugin.is_some(),
        communication_options: communication.is_valid(),
        nodes: nodes_valid,
        communication,
    };

    if let Some(key) = validation.first_error() {
        debug!("Device {} is invalid: {}", device.name, key);
    }

    device.validation = validation;
}
