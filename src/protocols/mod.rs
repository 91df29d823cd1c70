//! Protocol plugins.
//!
//! Every supported [`Protocol`] has one stateless plugin bundling its
//! defaults, the conversion between the editable (form) and the normalized
//! (API) shape of its options and the per-field validation of those options.
//! Plugins are looked up through a [`PluginRegistry`] that is built once and
//! handed to whoever needs it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::editing::EditingState;
use crate::models::{EditableNode, NodeType, Protocol};

pub mod modbus_rtu;
pub mod none;
pub mod opcua;

pub use modbus_rtu::{
    EditableModbusCommunicationOptions, EditableModbusNodeOptions, EndianMode,
    ModbusCommunicationOptions, ModbusCommunicationValidation, ModbusDataType, ModbusFunction,
    ModbusNodeOptions, ModbusNodeValidation, ModbusRtuPlugin, Parity,
};
pub use none::NonePlugin;
pub use opcua::{
    EditableOpcUaCommunicationOptions, EditableOpcUaNodeOptions, OpcUaCommunicationOptions,
    OpcUaCommunicationValidation, OpcUaNodeOptions, OpcUaNodeValidation, OpcUaPlugin, OpcUaType,
};

/// Misuse of a plugin. These mean the form state and the selected plugin
/// went out of sync and are not meant for end users.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("Operation {operation} is not supported by protocol {protocol}")]
    Unsupported { protocol: Protocol, operation: &'static str },
    #[error("Type {tag} is not known to protocol {protocol}")]
    UnsupportedType { protocol: Protocol, tag: String },
    #[error("Options of protocol {found} handed to the {expected} plugin")]
    Mismatch { expected: Protocol, found: Protocol },
    #[error("Protocol {0} is not registered")]
    UnknownProtocol(Protocol),
    #[error("Field {field} holds {value:?} which is not a valid number")]
    InvalidNumber { field: &'static str, value: String },
}

/// Device level communication settings as persisted through the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationOptions {
    None,
    ModbusRtu(ModbusCommunicationOptions),
    OpcUa(OpcUaCommunicationOptions),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditableCommunicationOptions {
    None,
    ModbusRtu(EditableModbusCommunicationOptions),
    OpcUa(EditableOpcUaCommunicationOptions),
}

/// Where a node's value lives on the device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeProtocolOptions {
    None,
    ModbusRtu(ModbusNodeOptions),
    OpcUa(OpcUaNodeOptions),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditableNodeProtocolOptions {
    None,
    ModbusRtu(EditableModbusNodeOptions),
    OpcUa(EditableOpcUaNodeOptions),
}

impl CommunicationOptions {
    pub fn protocol(&self) -> Protocol {
        match self {
            CommunicationOptions::None => Protocol::None,
            CommunicationOptions::ModbusRtu(_) => Protocol::ModbusRtu,
            CommunicationOptions::OpcUa(_) => Protocol::OpcUa,
        }
    }
}

impl EditableCommunicationOptions {
    pub fn protocol(&self) -> Protocol {
        match self {
            EditableCommunicationOptions::None => Protocol::None,
            EditableCommunicationOptions::ModbusRtu(_) => Protocol::ModbusRtu,
            EditableCommunicationOptions::OpcUa(_) => Protocol::OpcUa,
        }
    }
}

impl NodeProtocolOptions {
    pub fn protocol(&self) -> Protocol {
        match self {
            NodeProtocolOptions::None => Protocol::None,
            NodeProtocolOptions::ModbusRtu(_) => Protocol::ModbusRtu,
            NodeProtocolOptions::OpcUa(_) => Protocol::OpcUa,
        }
    }
}

impl EditableNodeProtocolOptions {
    pub fn protocol(&self) -> Protocol {
        match self {
            EditableNodeProtocolOptions::None => Protocol::None,
            EditableNodeProtocolOptions::ModbusRtu(_) => Protocol::ModbusRtu,
            EditableNodeProtocolOptions::OpcUa(_) => Protocol::OpcUa,
        }
    }
}

/// Per-field result of checking device communication options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationValidation {
    #[default]
    None,
    ModbusRtu(ModbusCommunicationValidation),
    OpcUa(OpcUaCommunicationValidation),
    /// Options belong to another protocol than the one checking them
    Mismatch,
}

impl CommunicationValidation {
    pub fn is_valid(&self) -> bool {
        match self {
            CommunicationValidation::None => true,
            CommunicationValidation::ModbusRtu(v) => v.is_valid(),
            CommunicationValidation::OpcUa(v) => v.is_valid(),
            CommunicationValidation::Mismatch => false,
        }
    }
}

/// Per-field result of checking node protocol options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeOptionsValidation {
    #[default]
    None,
    ModbusRtu(ModbusNodeValidation),
    OpcUa(OpcUaNodeValidation),
    Mismatch,
}

impl NodeOptionsValidation {
    pub fn is_valid(&self) -> bool {
        match self {
            NodeOptionsValidation::None => true,
            NodeOptionsValidation::ModbusRtu(v) => v.is_valid(),
            NodeOptionsValidation::OpcUa(v) => v.is_valid(),
            NodeOptionsValidation::Mismatch => false,
        }
    }
}

pub trait ProtocolPlugin: Send + Sync {
    fn protocol(&self) -> Protocol;

    fn default_communication_options(&self) -> EditableCommunicationOptions;

    fn default_node_options(&self) -> EditableNodeProtocolOptions;

    /// True when the protocol type tag stands for an integer or float encoding
    fn is_numeric(&self, options: &EditableNodeProtocolOptions) -> Result<bool, ProtocolError> {
        Ok(self.convert_type_to_generic(options)?.is_numeric())
    }

    fn convert_type_to_generic(&self, options: &EditableNodeProtocolOptions) -> Result<NodeType, ProtocolError>;

    /// Store a new type tag on the node and fix up the fields depending on it
    fn set_protocol_type(&self, node: &mut EditableNode, type_tag: &str, state: &mut EditingState) -> Result<(), ProtocolError>;

    fn communication_options_to_editable(&self, options: &CommunicationOptions) -> Result<EditableCommunicationOptions, ProtocolError>;

    fn communication_options_to_normal(&self, options: &EditableCommunicationOptions) -> Result<CommunicationOptions, ProtocolError>;

    fn node_options_to_editable(&self, options: &NodeProtocolOptions) -> Result<EditableNodeProtocolOptions, ProtocolError>;

    fn node_options_to_normal(&self, options: &EditableNodeProtocolOptions) -> Result<NodeProtocolOptions, ProtocolError>;

    fn validate_communication_options(&self, options: &EditableCommunicationOptions) -> CommunicationValidation;

    fn validate_node_options(&self, options: &EditableNodeProtocolOptions) -> NodeOptionsValidation;

    /// Grammar of the address a node is located by
    fn validate_communication_id(&self, communication_id: &str) -> bool;
}

/// The plugin implementing a protocol. New protocols must be added here.
pub fn plugin_for(protocol: Protocol) -> Box<dyn ProtocolPlugin> {
    match protocol {
        Protocol::None => Box::new(NonePlugin),
        Protocol::ModbusRtu => Box::new(ModbusRtuPlugin),
        Protocol::OpcUa => Box::new(OpcUaPlugin),
    }
}

/// Immutable table of the supported protocols
pub struct PluginRegistry {
    plugins: HashMap<Protocol, Box<dyn ProtocolPlugin>>,
}

impl PluginRegistry {
    /// Registry supporting every known protocol
    pub fn new() -> Self {
        PluginRegistry::with_protocols(&Protocol::ALL)
    }

    /// Registry limited to some protocols, the others count as unsupported
    pub fn with_protocols(protocols: &[Protocol]) -> Self {
        let plugins = protocols.iter().map(|p| (*p, plugin_for(*p))).collect();
        PluginRegistry { plugins }
    }

    pub fn get(&self, protocol: Protocol) -> Result<&dyn ProtocolPlugin, ProtocolError> {
        self.plugins
            .get(&protocol)
            .map(|p| p.as_ref())
            .ok_or(ProtocolError::UnknownProtocol(protocol))
    }

    pub fn contains(&self, protocol: Protocol) -> bool {
        self.plugins.contains_key(&protocol)
    }

    pub fn protocols(&self) -> Vec<Protocol> {
        Protocol::ALL.iter().copied().filter(|p| self.contains(*p)).collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        PluginRegistry::new()
    }
}

pub(crate) fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ProtocolError> {
    value.trim().parse::<T>().map_err(|_| ProtocolError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_every_protocol() {
        let registry = PluginRegistry::new();
        for protocol in Protocol::ALL {
            assert_eq!(registry.get(protocol).unwrap().protocol(), protocol);
        }
        assert_eq!(registry.protocols(), Protocol::ALL.to_vec());
    }

    #[test]
    fn test_limited_registry() {
        let registry = PluginRegistry::with_protocols(&[Protocol::None, Protocol::ModbusRtu]);
        assert!(registry.contains(Protocol::ModbusRtu));
        assert!(!registry.contains(Protocol::OpcUa));
        assert_eq!(
            registry.get(Protocol::OpcUa).err(),
            Some(ProtocolError::UnknownProtocol(Protocol::OpcUa))
        );
    }

    #[test]
    fn test_options_serialize_with_protocol_tag() {
        let options = NodeProtocolOptions::OpcUa(OpcUaNodeOptions {
            data_type: OpcUaType::Float,
            node_id: "ns=2;i=1001".to_string(),
        });
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["protocol"], "OPC_UA");
        assert_eq!(json["type"], "FLOAT");
        let back: NodeProtocolOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, options);
        assert_eq!(back.protocol(), Protocol::OpcUa);
    }

    #[test]
    fn test_validation_aggregate() {
        assert!(CommunicationValidation::None.is_valid());
        assert!(!CommunicationValidation::Mismatch.is_valid());
        assert!(NodeOptionsValidation::None.is_valid());
        assert!(!NodeOptionsValidation::Mismatch.is_valid());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u16>("address", " 12 "), Ok(12));
        assert_eq!(
            parse_number::<u16>("address", "x"),
            Err(ProtocolError::InvalidNumber { field: "address", value: "x".to_string() })
        );
    }
}
