use super::{
    CommunicationOptions, CommunicationValidation, EditableCommunicationOptions,
    EditableNodeProtocolOptions, NodeOptionsValidation, NodeProtocolOptions, ProtocolError,
    ProtocolPlugin,
};
use crate::editing::EditingState;
use crate::models::{EditableNode, NodeType, Protocol};

fn unsupported(operation: &'static str) -> ProtocolError {
    ProtocolError::Unsupported { protocol: Protocol::None, operation }
}

/// Plugin for devices without communication and for calculated nodes
pub struct NonePlugin;

impl ProtocolPlugin for NonePlugin {
    fn protocol(&self) -> Protocol {
        Protocol::None
    }

    fn default_communication_options(&self) -> EditableCommunicationOptions {
        EditableCommunicationOptions::None
    }

    fn default_node_options(&self) -> EditableNodeProtocolOptions {
        EditableNodeProtocolOptions::None
    }

    fn convert_type_to_generic(&self, _options: &EditableNodeProtocolOptions) -> Result<NodeType, ProtocolError> {
        Err(unsupported("convert_type_to_generic"))
    }

    fn set_protocol_type(&self, _node: &mut EditableNode, _type_tag: &str, _state: &mut EditingState) -> Result<(), ProtocolError> {
        Err(unsupported("set_protocol_type"))
    }

    fn communication_options_to_editable(&self, _options: &CommunicationOptions) -> Result<EditableCommunicationOptions, ProtocolError> {
        Err(unsupported("communication_options_to_editable"))
    }

    fn communication_options_to_normal(&self, _options: &EditableCommunicationOptions) -> Result<CommunicationOptions, ProtocolError> {
        Err(unsupported("communication_options_to_normal"))
    }

    fn node_options_to_editable(&self, options: &NodeProtocolOptions) -> Result<EditableNodeProtocolOptions, ProtocolError> {
        match options {
            NodeProtocolOptions::None => Ok(EditableNodeProtocolOptions::None),
            other => Err(ProtocolError::Mismatch { expected: Protocol::None, found: other.protocol() }),
        }
    }

    fn node_options_to_normal(&self, options: &EditableNodeProtocolOptions) -> Result<NodeProtocolOptions, ProtocolError> {
        match options {
            EditableNodeProtocolOptions::None => Ok(NodeProtocolOptions::None),
            other => Err(ProtocolError::Mismatch { expected: Protocol::None, found: other.protocol() }),
        }
    }

    fn validate_communication_options(&self, options: &EditableCommunicationOptions) -> CommunicationValidation {
        match options {
            EditableCommunicationOptions::None => CommunicationValidation::None,
            _ => CommunicationValidation::Mismatch,
        }
    }

    fn validate_node_options(&self, options: &EditableNodeProtocolOptions) -> NodeOptionsValidation {
        match options {
            EditableNodeProtocolOptions::None => NodeOptionsValidation::None,
            _ => NodeOptionsValidation::Mismatch,
        }
    }

    /// Nodes without protocol are not addressed on the device
    fn validate_communication_id(&self, communication_id: &str) -> bool {
        communication_id.is_empty()
    }
}
