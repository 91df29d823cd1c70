//! Moving nodes and devices between the API shape and the form shape.

use log::warn;
use std::collections::HashMap;
use uuid::Uuid;

use super::{
    Alarm, Device, EditableAlarm, EditableDevice, EditableNode, EditableNodeConfig, MeterType, Node,
    NodeConfig, NodeType, Phase, Protocol,
};
use crate::protocols::{
    parse_number, CommunicationOptions, EditableCommunicationOptions, PluginRegistry, ProtocolError,
};
use crate::validation::{DeviceValidation, NodeValidation};

const DEFAULT_DECIMAL_PLACES: &str = "2";

fn optional_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn optional_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<Option<T>, ProtocolError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_number(field, value)?))
}

fn alarm_to_editable(alarm: &Alarm) -> EditableAlarm {
    EditableAlarm { enabled: alarm.enabled, value: optional_to_string(alarm.value) }
}

fn alarm_to_normal(field: &'static str, alarm: &EditableAlarm) -> Result<Alarm, ProtocolError> {
    let value: Option<f64> = optional_number(field, &alarm.value)?;
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(ProtocolError::InvalidNumber { field, value: alarm.value.clone() });
        }
    }
    Ok(Alarm { enabled: alarm.enabled, value })
}

impl EditableNodeConfig {
    pub fn from_config(config: &NodeConfig) -> Self {
        EditableNodeConfig {
            node_type: config.node_type,
            custom: config.custom,
            calculated: config.calculated,
            incremental: config.incremental,
            unit: config.unit.clone(),
            decimal_places: optional_to_string(config.decimal_places),
            logging: config.logging,
            logging_period: optional_to_string(config.logging_period),
            min_alarm: alarm_to_editable(&config.min_alarm),
            max_alarm: alarm_to_editable(&config.max_alarm),
            calculate_increment: config.calculate_increment,
            positive_incremental: config.positive_incremental,
        }
    }

    pub fn to_config(&self) -> Result<NodeConfig, ProtocolError> {
        Ok(NodeConfig {
            node_type: self.node_type,
            custom: self.custom,
            calculated: self.calculated,
            incremental: self.incremental,
            unit: self.unit.trim().to_string(),
            decimal_places: optional_number("decimal_places", &self.decimal_places)?,
            logging: self.logging,
            logging_period: optional_number("logging_period", &self.logging_period)?,
            min_alarm: alarm_to_normal("min_alarm", &self.min_alarm)?,
            max_alarm: alarm_to_normal("max_alarm", &self.max_alarm)?,
            calculate_increment: self.calculate_increment,
            positive_incremental: self.positive_incremental,
        })
    }
}

impl EditableNode {
    /// Fresh node with the defaults of its protocol
    pub fn new(display_name: &str, phase: Phase, protocol: Protocol, registry: &PluginRegistry) -> Result<Self, ProtocolError> {
        let plugin = registry.get(protocol)?;
        let protocol_options = plugin.default_node_options();

        /* calculated nodes have no protocol type to derive it from */
        let node_type = match protocol {
            Protocol::None => NodeType::Float,
            _ => plugin.convert_type_to_generic(&protocol_options)?,
        };

        let decimal_places = if node_type.is_numeric() { DEFAULT_DECIMAL_PLACES.to_string() } else { String::new() };

        Ok(EditableNode {
            display_name: display_name.to_string(),
            protocol,
            communication_id: String::new(),
            phase,
            protocol_options,
            config: EditableNodeConfig { node_type, decimal_places, ..EditableNodeConfig::default() },
            validation: NodeValidation::default(),
        })
    }

    pub fn from_node(node: &Node, registry: &PluginRegistry) -> Result<Self, ProtocolError> {
        let plugin = registry.get(node.protocol)?;

        Ok(EditableNode {
            display_name: node.display_name.clone(),
            protocol: node.protocol,
            communication_id: node.communication_id.clone(),
            phase: node.phase,
            protocol_options: plugin.node_options_to_editable(&node.protocol_options)?,
            config: EditableNodeConfig::from_config(&node.config),
            validation: NodeValidation::default(),
        })
    }

    /// Payload for the API, fails on the first field that does not parse
    pub fn to_node(&self, registry: &PluginRegistry) -> Result<Node, ProtocolError> {
        let convert = || -> Result<Node, ProtocolError> {
            let plugin = registry.get(self.protocol)?;
            Ok(Node {
                display_name: self.display_name.trim().to_string(),
                protocol: self.protocol,
                communication_id: self.communication_id.trim().to_string(),
                phase: self.phase,
                protocol_options: plugin.node_options_to_normal(&self.protocol_options)?,
                config: self.config.to_config()?,
            })
        };

        convert().map_err(|e| {
            warn!("Unable to convert node {}: {}", self.display_name, e);
            e
        })
    }
}

impl EditableDevice {
    /// Fresh device with a new id and the defaults of its protocol
    pub fn new(name: &str, protocol: Protocol, meter_type: MeterType, registry: &PluginRegistry) -> Result<Self, ProtocolError> {
        let plugin = registry.get(protocol)?;

        Ok(EditableDevice {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            protocol,
            meter_type,
            options: HashMap::new(),
            communication_options: plugin.default_communication_options(),
            validation: DeviceValidation::default(),
        })
    }

    pub fn from_device(device: &Device, registry: &PluginRegistry) -> Result<Self, ProtocolError> {
        let plugin = registry.get(device.protocol)?;

        /* the NONE plugin has no communication options to convert */
        let communication_options = match (device.protocol, &device.communication_options) {
            (Protocol::None, CommunicationOptions::None) => EditableCommunicationOptions::None,
            (_, options) => plugin.communication_options_to_editable(options)?,
        };

        Ok(EditableDevice {
            id: device.id.clone(),
            name: device.name.clone(),
            protocol: device.protocol,
            meter_type: device.meter_type,
            options: device.options.clone(),
            communication_options,
            validation: DeviceValidation::default(),
        })
    }

    pub fn to_device(&self, registry: &PluginRegistry) -> Result<Device, ProtocolError> {
        let convert = || -> Result<Device, ProtocolError> {
            let plugin = registry.get(self.protocol)?;
            let communication_options = match (self.protocol, &self.communication_options) {
                (Protocol::None, EditableCommunicationOptions::None) => CommunicationOptions::None,
                (_, options) => plugin.communication_options_to_normal(options)?,
            };

            Ok(Device {
                id: self.id.clone(),
                name: self.name.clone(),
                protocol: self.protocol,
                meter_type: self.meter_type,
                options: self.options.clone(),
                communication_options,
            })
        };

        convert().map_err(|e| {
            warn!("Unable to convert device {}: {}", self.name, e);
            e
        })
    }
}
