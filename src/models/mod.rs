use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::protocols::{
    CommunicationOptions, EditableCommunicationOptions, EditableNodeProtocolOptions,
    NodeProtocolOptions,
};
use crate::validation::{DeviceValidation, NodeValidation};

pub mod convert;

/// Communication protocol of a device or a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    None,
    ModbusRtu,
    OpcUa,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::None, Protocol::ModbusRtu, Protocol::OpcUa];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(Protocol::None),
            "MODBUS_RTU" => Some(Protocol::ModbusRtu),
            "OPC_UA" => Some(Protocol::OpcUa),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::None => "NONE",
            Protocol::ModbusRtu => "MODBUS_RTU",
            Protocol::OpcUa => "OPC_UA",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic value type of a node, independent of the protocol encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Bool,
    Int,
    Float,
    String,
}

impl NodeType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BOOL" => Some(NodeType::Bool),
            "INT" => Some(NodeType::Int),
            "FLOAT" => Some(NodeType::Float),
            "STRING" => Some(NodeType::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Bool => "BOOL",
            NodeType::Int => "INT",
            NodeType::Float => "FLOAT",
            NodeType::String => "STRING",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, NodeType::Int | NodeType::Float)
    }
}

/// Section a node is listed in. Names must be unique per section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Generic,
    L1,
    L2,
    L3,
}

impl Phase {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GENERIC" => Some(Phase::Generic),
            "L1" => Some(Phase::L1),
            "L2" => Some(Phase::L2),
            "L3" => Some(Phase::L3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generic => "GENERIC",
            Phase::L1 => "L1",
            Phase::L2 => "L2",
            Phase::L3 => "L3",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeterType {
    SinglePhase,
    ThreePhase,
}

impl MeterType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SINGLE_PHASE" => Some(MeterType::SinglePhase),
            "THREE_PHASE" => Some(MeterType::ThreePhase),
            _ => None,
        }
    }

    /// Sections a meter of this type lists its nodes in
    pub fn phases(&self) -> &'static [Phase] {
        match self {
            MeterType::SinglePhase => &[Phase::Generic],
            MeterType::ThreePhase => &[Phase::Generic, Phase::L1, Phase::L2, Phase::L3],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Alarm {
    pub enabled: bool,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditableAlarm {
    pub enabled: bool,
    pub value: String,
}

/// Node configuration as persisted through the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub calculated: bool,
    #[serde(default)]
    pub incremental: bool,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub decimal_places: Option<u8>,
    #[serde(default)]
    pub logging: bool,
    #[serde(default)]
    pub logging_period: Option<u32>,
    #[serde(default)]
    pub min_alarm: Alarm,
    #[serde(default)]
    pub max_alarm: Alarm,
    #[serde(default)]
    pub calculate_increment: bool,
    #[serde(default)]
    pub positive_incremental: bool,
}

/// Node configuration bound to a form, every number kept as typed text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableNodeConfig {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub custom: bool,
    pub calculated: bool,
    pub incremental: bool,
    pub unit: String,
    pub decimal_places: String,
    pub logging: bool,
    pub logging_period: String,
    pub min_alarm: EditableAlarm,
    pub max_alarm: EditableAlarm,
    pub calculate_increment: bool,
    pub positive_incremental: bool,
}

impl Default for EditableNodeConfig {
    fn default() -> Self {
        EditableNodeConfig {
            node_type: NodeType::Float,
            custom: false,
            calculated: false,
            incremental: false,
            unit: String::new(),
            decimal_places: String::new(),
            logging: false,
            logging_period: String::new(),
            min_alarm: EditableAlarm::default(),
            max_alarm: EditableAlarm::default(),
            calculate_increment: false,
            positive_incremental: false,
        }
    }
}

/// A measured or calculated variable of a device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub display_name: String,
    pub protocol: Protocol,
    #[serde(default)]
    pub communication_id: String,
    pub phase: Phase,
    pub protocol_options: NodeProtocolOptions,
    pub config: NodeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableNode {
    pub display_name: String,
    pub protocol: Protocol,
    pub communication_id: String,
    pub phase: Phase,
    pub protocol_options: EditableNodeProtocolOptions,
    pub config: EditableNodeConfig,
    #[serde(skip)]
    pub validation: NodeValidation,
}

/// Represents a metering device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    /// Unique identifier for the device
    #[serde(default)]
    pub id: String,
    /// Human-readable name of the device
    pub name: String,
    pub protocol: Protocol,
    pub meter_type: MeterType,
    /// Additional device-specific parameters
    #[serde(default)]
    pub options: HashMap<String, String>,
    pub communication_options: CommunicationOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableDevice {
    pub id: String,
    pub name: String,
    pub protocol: Protocol,
    pub meter_type: MeterType,
    pub options: HashMap<String, String>,
    pub communication_options: EditableCommunicationOptions,
    #[serde(skip)]
    pub validation: DeviceValidation,
}

impl EditableDevice {
    /// Set a device parameter
    pub fn set_option(&mut self, key: String, value: String) {
        self.options.insert(key, value);
    }

    /// Get a device parameter
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_tags() {
        for protocol in Protocol::ALL {
            assert_eq!(Protocol::from_str(protocol.as_str()), Some(protocol));
        }
        assert_eq!(Protocol::from_str("MODBUS_TCP"), None);
        assert_eq!(serde_json::to_string(&Protocol::OpcUa).unwrap(), "\"OPC_UA\"");
    }

    #[test]
    fn test_node_type_numeric() {
        assert!(NodeType::Int.is_numeric());
        assert!(NodeType::Float.is_numeric());
        assert!(!NodeType::Bool.is_numeric());
        assert!(!NodeType::String.is_numeric());
        assert_eq!(NodeType::from_str("STRING"), Some(NodeType::String));
    }

    #[test]
    fn test_meter_type_phases() {
        assert_eq!(MeterType::SinglePhase.phases(), &[Phase::Generic]);
        assert_eq!(MeterType::ThreePhase.phases().len(), 4);
        assert_eq!(MeterType::from_str("THREE_PHASE"), Some(MeterType::ThreePhase));
        assert_eq!(Phase::from_str(Phase::L2.as_str()), Some(Phase::L2));
    }

    #[test]
    fn test_node_config_defaults_from_yaml() {
        let config: NodeConfig = serde_yml::from_str("type: FLOAT\nunit: V\n").unwrap();
        assert_eq!(config.node_type, NodeType::Float);
        assert!(!config.logging);
        assert_eq!(config.logging_period, None);
        assert!(!config.min_alarm.enabled);
    }
}
