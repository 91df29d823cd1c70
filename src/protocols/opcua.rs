use log::warn;
use serde::{Deserialize, Serialize};

use super::{
    CommunicationOptions, CommunicationValidation, EditableCommunicationOptions,
    EditableNodeProtocolOptions, NodeOptionsValidation, NodeProtocolOptions, ProtocolError,
    ProtocolPlugin,
};
use crate::editing::EditingState;
use crate::grammar::{validate_opcua_node_id, validate_opcua_url};
use crate::models::{EditableNode, NodeType, Protocol};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpcUaType {
    Bool,
    Int,
    Float,
    String,
}

impl OpcUaType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BOOL" => Some(OpcUaType::Bool),
            "INT" => Some(OpcUaType::Int),
            "FLOAT" => Some(OpcUaType::Float),
            "STRING" => Some(OpcUaType::String),
            _ => None,
        }
    }

    pub fn generic(&self) -> NodeType {
        match self {
            OpcUaType::Bool => NodeType::Bool,
            OpcUaType::Int => NodeType::Int,
            OpcUaType::Float => NodeType::Float,
            OpcUaType::String => NodeType::String,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpcUaCommunicationOptions {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableOpcUaCommunicationOptions {
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpcUaCommunicationValidation {
    pub url: bool,
    pub username: bool,
    pub password: bool,
}

impl OpcUaCommunicationValidation {
    pub fn is_valid(&self) -> bool {
        self.url && self.username && self.password
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpcUaNodeOptions {
    #[serde(rename = "type")]
    pub data_type: OpcUaType,
    pub node_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableOpcUaNodeOptions {
    #[serde(rename = "type")]
    pub data_type: OpcUaType,
    pub node_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpcUaNodeValidation {
    #[serde(rename = "type")]
    pub data_type: bool,
    pub node_id: bool,
}

impl OpcUaNodeValidation {
    pub fn is_valid(&self) -> bool {
        self.data_type && self.node_id
    }
}

pub fn validate_opcua_communication_options(options: &EditableOpcUaCommunicationOptions) -> OpcUaCommunicationValidation {
    let username = options.username.trim() == options.username;
    /* a password alone can not be used to authenticate */
    let password = options.password.is_empty() || !options.username.is_empty();

    OpcUaCommunicationValidation {
        url: validate_opcua_url(&options.url),
        username,
        password,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn mismatch(found: Protocol) -> ProtocolError {
    ProtocolError::Mismatch { expected: Protocol::OpcUa, found }
}

pub struct OpcUaPlugin;

impl ProtocolPlugin for OpcUaPlugin {
    fn protocol(&self) -> Protocol {
        Protocol::OpcUa
    }

    fn default_communication_options(&self) -> EditableCommunicationOptions {
        EditableCommunicationOptions::OpcUa(EditableOpcUaCommunicationOptions {
            url: "opc.tcp://".to_string(),
            username: String::new(),
            password: String::new(),
        })
    }

    fn default_node_options(&self) -> EditableNodeProtocolOptions {
        EditableNodeProtocolOptions::OpcUa(EditableOpcUaNodeOptions {
            data_type: OpcUaType::Float,
            node_id: String::new(),
        })
    }

    fn convert_type_to_generic(&self, options: &EditableNodeProtocolOptions) -> Result<NodeType, ProtocolError> {
        match options {
            EditableNodeProtocolOptions::OpcUa(o) => Ok(o.data_type.generic()),
            other => Err(mismatch(other.protocol())),
        }
    }

    fn set_protocol_type(&self, node: &mut EditableNode, type_tag: &str, _state: &mut EditingState) -> Result<(), ProtocolError> {
        let data_type = OpcUaType::from_str(type_tag).ok_or_else(|| ProtocolError::UnsupportedType {
            protocol: Protocol::OpcUa,
            tag: type_tag.to_string(),
        })?;

        match &mut node.protocol_options {
            EditableNodeProtocolOptions::OpcUa(o) => o.data_type = data_type,
            other => return Err(mismatch(other.protocol())),
        }

        node.config.node_type = data_type.generic();
        Ok(())
    }

    fn communication_options_to_editable(&self, options: &CommunicationOptions) -> Result<EditableCommunicationOptions, ProtocolError> {
        match options {
            CommunicationOptions::OpcUa(o) => Ok(EditableCommunicationOptions::OpcUa(EditableOpcUaCommunicationOptions {
                url: o.url.clone(),
                username: o.username.clone().unwrap_or_default(),
                password: o.password.clone().unwrap_or_default(),
            })),
            other => Err(mismatch(other.protocol())),
        }
    }

    fn communication_options_to_normal(&self, options: &EditableCommunicationOptions) -> Result<CommunicationOptions, ProtocolError> {
        match options {
            EditableCommunicationOptions::OpcUa(o) => Ok(CommunicationOptions::OpcUa(OpcUaCommunicationOptions {
                url: o.url.trim().to_string(),
                username: non_empty(&o.username),
                password: non_empty(&o.password),
            })),
            other => Err(mismatch(other.protocol())),
        }
    }

    fn node_options_to_editable(&self, options: &NodeProtocolOptions) -> Result<EditableNodeProtocolOptions, ProtocolError> {
        match options {
            NodeProtocolOptions::OpcUa(o) => Ok(EditableNodeProtocolOptions::OpcUa(EditableOpcUaNodeOptions {
                data_type: o.data_type,
                node_id: o.node_id.clone(),
            })),
            other => Err(mismatch(other.protocol())),
        }
    }

    fn node_options_to_normal(&self, options: &EditableNodeProtocolOptions) -> Result<NodeProtocolOptions, ProtocolError> {
        match options {
            EditableNodeProtocolOptions::OpcUa(o) => Ok(NodeProtocolOptions::OpcUa(OpcUaNodeOptions {
                data_type: o.data_type,
                node_id: o.node_id.trim().to_string(),
            })),
            other => Err(mismatch(other.protocol())),
        }
    }

    fn validate_communication_options(&self, options: &EditableCommunicationOptions) -> CommunicationValidation {
        match options {
            EditableCommunicationOptions::OpcUa(o) => CommunicationValidation::OpcUa(validate_opcua_communication_options(o)),
            other => {
                warn!("OPC UA plugin asked to check {} communication options", other.protocol());
                CommunicationValidation::Mismatch
            }
        }
    }

    fn validate_node_options(&self, options: &EditableNodeProtocolOptions) -> NodeOptionsValidation {
        match options {
            EditableNodeProtocolOptions::OpcUa(o) => NodeOptionsValidation::OpcUa(OpcUaNodeValidation {
                data_type: true,
                node_id: validate_opcua_node_id(&o.node_id),
            }),
            _ => NodeOptionsValidation::Mismatch,
        }
    }

    fn validate_communication_id(&self, communication_id: &str) -> bool {
        validate_opcua_node_id(communication_id)
    }
}
