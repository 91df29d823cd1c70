use log::warn;
use serde::{Deserialize, Serialize};

use super::{
    parse_number, CommunicationOptions, CommunicationValidation, EditableCommunicationOptions,
    EditableNodeProtocolOptions, NodeOptionsValidation, NodeProtocolOptions, ProtocolError,
    ProtocolPlugin,
};
use crate::editing::{self, EditingState};
use crate::grammar::{validate_modbus_port, validate_modbus_register};
use crate::models::{EditableNode, NodeType, Protocol};

const VALID_BAUD_RATES: &[u32] = &[
    300, 600, 1200, 2400, 4800, 9600, 14400, 19200, 38400, 57600, 115200, 230400, 460800, 921600,
];
const MAX_SLAVE_ID: u8 = 247;
const MAX_TIMEOUT_MS: u32 = 60_000;
const MAX_BIT: u8 = 15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModbusDataType {
    Bool,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
}

impl ModbusDataType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BOOL" => Some(ModbusDataType::Bool),
            "INT16" => Some(ModbusDataType::Int16),
            "UINT16" => Some(ModbusDataType::Uint16),
            "INT32" => Some(ModbusDataType::Int32),
            "UINT32" => Some(ModbusDataType::Uint32),
            "INT64" => Some(ModbusDataType::Int64),
            "UINT64" => Some(ModbusDataType::Uint64),
            "FLOAT32" => Some(ModbusDataType::Float32),
            "FLOAT64" => Some(ModbusDataType::Float64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModbusDataType::Bool => "BOOL",
            ModbusDataType::Int16 => "INT16",
            ModbusDataType::Uint16 => "UINT16",
            ModbusDataType::Int32 => "INT32",
            ModbusDataType::Uint32 => "UINT32",
            ModbusDataType::Int64 => "INT64",
            ModbusDataType::Uint64 => "UINT64",
            ModbusDataType::Float32 => "FLOAT32",
            ModbusDataType::Float64 => "FLOAT64",
        }
    }

    /// Number of 16 bit registers a value occupies
    pub fn register_count(&self) -> u16 {
        match self {
            ModbusDataType::Bool | ModbusDataType::Int16 | ModbusDataType::Uint16 => 1,
            ModbusDataType::Int32 | ModbusDataType::Uint32 | ModbusDataType::Float32 => 2,
            ModbusDataType::Int64 | ModbusDataType::Uint64 | ModbusDataType::Float64 => 4,
        }
    }

    pub fn is_multi_register(&self) -> bool {
        self.register_count() > 1
    }

    pub fn generic(&self) -> NodeType {
        match self {
            ModbusDataType::Bool => NodeType::Bool,
            ModbusDataType::Int16
            | ModbusDataType::Uint16
            | ModbusDataType::Int32
            | ModbusDataType::Uint32
            | ModbusDataType::Int64
            | ModbusDataType::Uint64 => NodeType::Int,
            ModbusDataType::Float32 | ModbusDataType::Float64 => NodeType::Float,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModbusFunction {
    ReadCoils,
    ReadDiscreteInputs,
    ReadHoldingRegisters,
    ReadInputRegisters,
    WriteSingleCoil,
    WriteSingleRegister,
    WriteMultipleCoils,
    WriteMultipleRegisters,
}

impl ModbusFunction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "READ_COILS" => Some(ModbusFunction::ReadCoils),
            "READ_DISCRETE_INPUTS" => Some(ModbusFunction::ReadDiscreteInputs),
            "READ_HOLDING_REGISTERS" => Some(ModbusFunction::ReadHoldingRegisters),
            "READ_INPUT_REGISTERS" => Some(ModbusFunction::ReadInputRegisters),
            "WRITE_SINGLE_COIL" => Some(ModbusFunction::WriteSingleCoil),
            "WRITE_SINGLE_REGISTER" => Some(ModbusFunction::WriteSingleRegister),
            "WRITE_MULTIPLE_COILS" => Some(ModbusFunction::WriteMultipleCoils),
            "WRITE_MULTIPLE_REGISTERS" => Some(ModbusFunction::WriteMultipleRegisters),
            _ => None,
        }
    }

    /// Coil and discrete input functions address single bits, so a boolean
    /// read through them needs no bit index
    pub fn is_bit_function(&self) -> bool {
        matches!(
            self,
            ModbusFunction::ReadCoils
                | ModbusFunction::ReadDiscreteInputs
                | ModbusFunction::WriteSingleCoil
                | ModbusFunction::WriteMultipleCoils
        )
    }
}

/// Word and byte order of multi register values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndianMode {
    BigEndian,
    LittleEndian,
    BigEndianByteSwap,
    LittleEndianByteSwap,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModbusCommunicationOptions {
    pub port: String,
    pub baud_rate: u32,
    #[serde(default)]
    pub parity: Parity,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub slave_id: u8,
    /// Response timeout in milliseconds
    pub timeout: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableModbusCommunicationOptions {
    pub port: String,
    pub baud_rate: String,
    pub parity: Parity,
    pub data_bits: String,
    pub stop_bits: String,
    pub slave_id: String,
    pub timeout: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModbusCommunicationValidation {
    pub port: bool,
    pub baud_rate: bool,
    pub data_bits: bool,
    pub stop_bits: bool,
    pub slave_id: bool,
    pub timeout: bool,
}

impl ModbusCommunicationValidation {
    pub fn is_valid(&self) -> bool {
        self.port && self.baud_rate && self.data_bits && self.stop_bits && self.slave_id && self.timeout
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModbusNodeOptions {
    #[serde(rename = "type")]
    pub data_type: ModbusDataType,
    pub function: ModbusFunction,
    pub address: u16,
    #[serde(default)]
    pub endian_mode: Option<EndianMode>,
    #[serde(default)]
    pub bit: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableModbusNodeOptions {
    #[serde(rename = "type")]
    pub data_type: ModbusDataType,
    pub function: ModbusFunction,
    pub address: String,
    pub endian_mode: Option<EndianMode>,
    pub bit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModbusNodeValidation {
    #[serde(rename = "type")]
    pub data_type: bool,
    pub function: bool,
    pub address: bool,
    pub endian_mode: bool,
    pub bit: bool,
}

impl ModbusNodeValidation {
    pub fn is_valid(&self) -> bool {
        self.data_type && self.function && self.address && self.endian_mode && self.bit
    }
}

/// A bit index is needed for booleans packed into a register
pub fn requires_bit(data_type: ModbusDataType, function: ModbusFunction) -> bool {
    data_type == ModbusDataType::Bool && !function.is_bit_function()
}

fn in_range<T: std::str::FromStr + PartialOrd>(value: &str, min: T, max: T) -> bool {
    match value.parse::<T>() {
        Ok(v) => v >= min && v <= max,
        Err(_) => false,
    }
}

pub fn validate_modbus_node_options(options: &EditableModbusNodeOptions) -> ModbusNodeValidation {
    let data_type = !options.function.is_bit_function() || options.data_type == ModbusDataType::Bool;
    let function = !(options.function == ModbusFunction::WriteSingleRegister && options.data_type.is_multi_register());
    let address = in_range::<u16>(&options.address, 0, u16::MAX);
    let endian_mode = options.data_type.is_multi_register() == options.endian_mode.is_some();
    let bit = if requires_bit(options.data_type, options.function) {
        options.bit.as_deref().map_or(false, |b| in_range::<u8>(b, 0, MAX_BIT))
    } else {
        options.bit.is_none()
    };

    ModbusNodeValidation { data_type, function, address, endian_mode, bit }
}

pub fn validate_modbus_communication_options(options: &EditableModbusCommunicationOptions) -> ModbusCommunicationValidation {
    ModbusCommunicationValidation {
        port: validate_modbus_port(&options.port),
        baud_rate: matches!(options.baud_rate.parse::<u32>(), Ok(b) if VALID_BAUD_RATES.contains(&b)),
        data_bits: in_range::<u8>(&options.data_bits, 7, 8),
        stop_bits: in_range::<u8>(&options.stop_bits, 1, 2),
        slave_id: in_range::<u8>(&options.slave_id, 1, MAX_SLAVE_ID),
        timeout: in_range::<u32>(&options.timeout, 1, MAX_TIMEOUT_MS),
    }
}

fn mismatch(found: Protocol) -> ProtocolError {
    ProtocolError::Mismatch { expected: Protocol::ModbusRtu, found }
}

pub struct ModbusRtuPlugin;

impl ModbusRtuPlugin {
    fn node_options<'a>(&self, options: &'a EditableNodeProtocolOptions) -> Result<&'a EditableModbusNodeOptions, ProtocolError> {
        match options {
            EditableNodeProtocolOptions::ModbusRtu(o) => Ok(o),
            other => Err(mismatch(other.protocol())),
        }
    }
}

impl ProtocolPlugin for ModbusRtuPlugin {
    fn protocol(&self) -> Protocol {
        Protocol::ModbusRtu
    }

    fn default_communication_options(&self) -> EditableCommunicationOptions {
        EditableCommunicationOptions::ModbusRtu(EditableModbusCommunicationOptions {
            port: String::new(),
            baud_rate: "9600".to_string(),
            parity: Parity::None,
            data_bits: "8".to_string(),
            stop_bits: "1".to_string(),
            slave_id: "1".to_string(),
            timeout: "1000".to_string(),
        })
    }

    fn default_node_options(&self) -> EditableNodeProtocolOptions {
        EditableNodeProtocolOptions::ModbusRtu(EditableModbusNodeOptions {
            data_type: ModbusDataType::Float32,
            function: ModbusFunction::ReadHoldingRegisters,
            address: String::new(),
            endian_mode: Some(EndianMode::BigEndian),
            bit: None,
        })
    }

    fn convert_type_to_generic(&self, options: &EditableNodeProtocolOptions) -> Result<NodeType, ProtocolError> {
        Ok(self.node_options(options)?.data_type.generic())
    }

    fn set_protocol_type(&self, node: &mut EditableNode, type_tag: &str, state: &mut EditingState) -> Result<(), ProtocolError> {
        let data_type = ModbusDataType::from_str(type_tag).ok_or_else(|| ProtocolError::UnsupportedType {
            protocol: Protocol::ModbusRtu,
            tag: type_tag.to_string(),
        })?;

        let options = match &mut node.protocol_options {
            EditableNodeProtocolOptions::ModbusRtu(o) => o,
            other => return Err(mismatch(other.protocol())),
        };

        options.data_type = data_type;
        editing::handle_type_change(options, state);
        node.config.node_type = data_type.generic();
        Ok(())
    }

    fn communication_options_to_editable(&self, options: &CommunicationOptions) -> Result<EditableCommunicationOptions, ProtocolError> {
        let o = match options {
            CommunicationOptions::ModbusRtu(o) => o,
            other => return Err(mismatch(other.protocol())),
        };

        Ok(EditableCommunicationOptions::ModbusRtu(EditableModbusCommunicationOptions {
            port: o.port.clone(),
            baud_rate: o.baud_rate.to_string(),
            parity: o.parity,
            data_bits: o.data_bits.to_string(),
            stop_bits: o.stop_bits.to_string(),
            slave_id: o.slave_id.to_string(),
            timeout: o.timeout.to_string(),
        }))
    }

    fn communication_options_to_normal(&self, options: &EditableCommunicationOptions) -> Result<CommunicationOptions, ProtocolError> {
        let o = match options {
            EditableCommunicationOptions::ModbusRtu(o) => o,
            other => return Err(mismatch(other.protocol())),
        };

        Ok(CommunicationOptions::ModbusRtu(ModbusCommunicationOptions {
            port: o.port.trim().to_string(),
            baud_rate: parse_number("baud_rate", &o.baud_rate)?,
            parity: o.parity,
            data_bits: parse_number("data_bits", &o.data_bits)?,
            stop_bits: parse_number("stop_bits", &o.stop_bits)?,
            slave_id: parse_number("slave_id", &o.slave_id)?,
            timeout: parse_number("timeout", &o.timeout)?,
        }))
    }

    fn node_options_to_editable(&self, options: &NodeProtocolOptions) -> Result<EditableNodeProtocolOptions, ProtocolError> {
        let o = match options {
            NodeProtocolOptions::ModbusRtu(o) => o,
            other => return Err(mismatch(other.protocol())),
        };

        Ok(EditableNodeProtocolOptions::ModbusRtu(EditableModbusNodeOptions {
            data_type: o.data_type,
            function: o.function,
            address: o.address.to_string(),
            endian_mode: o.endian_mode,
            bit: o.bit.map(|b| b.to_string()),
        }))
    }

    fn node_options_to_normal(&self, options: &EditableNodeProtocolOptions) -> Result<NodeProtocolOptions, ProtocolError> {
        let o = self.node_options(options)?;

        let bit = match &o.bit {
            Some(b) => Some(parse_number("bit", b)?),
            None => None,
        };

        Ok(NodeProtocolOptions::ModbusRtu(ModbusNodeOptions {
            data_type: o.data_type,
            function: o.function,
            address: parse_number("address", &o.address)?,
            endian_mode: o.endian_mode,
            bit,
        }))
    }

    fn validate_communication_options(&self, options: &EditableCommunicationOptions) -> CommunicationValidation {
        match options {
            EditableCommunicationOptions::ModbusRtu(o) => {
                CommunicationValidation::ModbusRtu(validate_modbus_communication_options(o))
            }
            other => {
                warn!("Modbus RTU plugin asked to check {} communication options", other.protocol());
                CommunicationValidation::Mismatch
            }
        }
    }

    fn validate_node_options(&self, options: &EditableNodeProtocolOptions) -> NodeOptionsValidation {
        match self.node_options(options) {
            Ok(o) => NodeOptionsValidation::ModbusRtu(validate_modbus_node_options(o)),
            Err(_) => NodeOptionsValidation::Mismatch,
        }
    }

    fn validate_communication_id(&self, communication_id: &str) -> bool {
        validate_modbus_register(communication_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EditableNodeConfig, Phase};
    use crate::protocols::{EditableOpcUaNodeOptions, OpcUaType};

    fn options(data_type: ModbusDataType, function: ModbusFunction) -> EditableModbusNodeOptions {
        EditableModbusNodeOptions {
            data_type,
            function,
            address: "100".to_string(),
            endian_mode: if data_type.is_multi_register() { Some(EndianMode::BigEndian) } else { None },
            bit: if requires_bit(data_type, function) { Some("0".to_string()) } else { None },
        }
    }

    fn editable_node(opts: EditableModbusNodeOptions) -> EditableNode {
        EditableNode {
            display_name: "voltage".to_string(),
            protocol: Protocol::ModbusRtu,
            communication_id: "0x0064".to_string(),
            phase: Phase::L1,
            protocol_options: EditableNodeProtocolOptions::ModbusRtu(opts),
            config: EditableNodeConfig::default(),
            validation: Default::default(),
        }
    }

    #[test]
    fn test_generic_types() {
        assert_eq!(ModbusDataType::Bool.generic(), NodeType::Bool);
        assert_eq!(ModbusDataType::Uint64.generic(), NodeType::Int);
        assert_eq!(ModbusDataType::Float32.generic(), NodeType::Float);
        let plugin = ModbusRtuPlugin;
        let opts = EditableNodeProtocolOptions::ModbusRtu(options(ModbusDataType::Int32, ModbusFunction::ReadInputRegisters));
        assert_eq!(plugin.is_numeric(&opts), Ok(true));
        let opts = EditableNodeProtocolOptions::ModbusRtu(options(ModbusDataType::Bool, ModbusFunction::ReadCoils));
        assert_eq!(plugin.is_numeric(&opts), Ok(false));
    }

    #[test]
    fn test_convert_type_rejects_foreign_options() {
        let plugin = ModbusRtuPlugin;
        let opts = EditableNodeProtocolOptions::OpcUa(EditableOpcUaNodeOptions {
            data_type: OpcUaType::Int,
            node_id: "ns=1;i=1".to_string(),
        });
        assert_eq!(
            plugin.convert_type_to_generic(&opts),
            Err(ProtocolError::Mismatch { expected: Protocol::ModbusRtu, found: Protocol::OpcUa })
        );
        assert_eq!(plugin.validate_node_options(&opts), NodeOptionsValidation::Mismatch);
    }

    #[test]
    fn test_validate_node_options() {
        let v = validate_modbus_node_options(&options(ModbusDataType::Float32, ModbusFunction::ReadHoldingRegisters));
        assert!(v.is_valid());

        let v = validate_modbus_node_options(&options(ModbusDataType::Bool, ModbusFunction::ReadCoils));
        assert!(v.is_valid());

        let v = validate_modbus_node_options(&options(ModbusDataType::Bool, ModbusFunction::ReadHoldingRegisters));
        assert!(v.is_valid());

        let mut o = options(ModbusDataType::Int16, ModbusFunction::ReadHoldingRegisters);
        o.function = ModbusFunction::ReadDiscreteInputs;
        assert!(!validate_modbus_node_options(&o).data_type);

        let v = validate_modbus_node_options(&options(ModbusDataType::Int32, ModbusFunction::WriteSingleRegister));
        assert!(!v.function);
        assert!(v.data_type);
    }

    #[test]
    fn test_validate_address_endian_and_bit() {
        let mut o = options(ModbusDataType::Float32, ModbusFunction::ReadHoldingRegisters);
        o.address = "65536".to_string();
        o.endian_mode = None;
        let v = validate_modbus_node_options(&o);
        assert!(!v.address);
        assert!(!v.endian_mode);

        let mut o = options(ModbusDataType::Int16, ModbusFunction::ReadHoldingRegisters);
        o.endian_mode = Some(EndianMode::LittleEndian);
        assert!(!validate_modbus_node_options(&o).endian_mode);

        let mut o = options(ModbusDataType::Bool, ModbusFunction::ReadInputRegisters);
        o.bit = Some("16".to_string());
        assert!(!validate_modbus_node_options(&o).bit);
        o.bit = Some(String::new());
        assert!(!validate_modbus_node_options(&o).bit);
        o.bit = Some("15".to_string());
        assert!(validate_modbus_node_options(&o).bit);

        let mut o = options(ModbusDataType::Bool, ModbusFunction::ReadCoils);
        o.bit = Some("1".to_string());
        assert!(!validate_modbus_node_options(&o).bit);
    }

    #[test]
    fn test_node_options_round_trip() {
        let plugin = ModbusRtuPlugin;
        for normal in [
            ModbusNodeOptions {
                data_type: ModbusDataType::Bool,
                function: ModbusFunction::ReadHoldingRegisters,
                address: 40001,
                endian_mode: None,
                bit: Some(3),
            },
            ModbusNodeOptions {
                data_type: ModbusDataType::Float64,
                function: ModbusFunction::ReadInputRegisters,
                address: 0,
                endian_mode: Some(EndianMode::LittleEndianByteSwap),
                bit: None,
            },
        ] {
            let normal = NodeProtocolOptions::ModbusRtu(normal);
            let editable = plugin.node_options_to_editable(&normal).unwrap();
            assert_eq!(plugin.node_options_to_normal(&editable).unwrap(), normal);
        }
    }

    #[test]
    fn test_node_options_to_normal_fails_fast() {
        let plugin = ModbusRtuPlugin;
        let mut o = options(ModbusDataType::Bool, ModbusFunction::ReadHoldingRegisters);
        o.bit = Some(String::new());
        let result = plugin.node_options_to_normal(&EditableNodeProtocolOptions::ModbusRtu(o));
        assert_eq!(result, Err(ProtocolError::InvalidNumber { field: "bit", value: String::new() }));
    }

    #[test]
    fn test_communication_options() {
        let plugin = ModbusRtuPlugin;
        let mut defaults = plugin.default_communication_options();
        let v = plugin.validate_communication_options(&defaults);
        match &v {
            CommunicationValidation::ModbusRtu(m) => {
                assert!(!m.port);
                assert!(m.baud_rate && m.data_bits && m.stop_bits && m.slave_id && m.timeout);
            }
            _ => panic!("unexpected validation {v:?}"),
        }

        if let EditableCommunicationOptions::ModbusRtu(o) = &mut defaults {
            o.port = "/dev/ttyUSB0".to_string();
        }
        assert!(plugin.validate_communication_options(&defaults).is_valid());

        let normal = plugin.communication_options_to_normal(&defaults).unwrap();
        match &normal {
            CommunicationOptions::ModbusRtu(o) => {
                assert_eq!(o.baud_rate, 9600);
                assert_eq!(o.slave_id, 1);
            }
            _ => panic!("unexpected options {normal:?}"),
        }
        assert_eq!(plugin.communication_options_to_editable(&normal).unwrap(), defaults);
    }

    #[test]
    fn test_communication_ranges() {
        let o = EditableModbusCommunicationOptions {
            port: "COM3".to_string(),
            baud_rate: "9601".to_string(),
            parity: Parity::Even,
            data_bits: "6".to_string(),
            stop_bits: "3".to_string(),
            slave_id: "248".to_string(),
            timeout: "0".to_string(),
        };
        let v = validate_modbus_communication_options(&o);
        assert!(v.port);
        assert!(!v.baud_rate);
        assert!(!v.data_bits);
        assert!(!v.stop_bits);
        assert!(!v.slave_id);
        assert!(!v.timeout);
        assert!(!v.is_valid());
    }

    #[test]
    fn test_set_protocol_type() {
        let plugin = ModbusRtuPlugin;
        let mut node = editable_node(options(ModbusDataType::Int16, ModbusFunction::ReadHoldingRegisters));
        let mut state = EditingState::default();
        state.previous_type = Some(ModbusDataType::Int16);

        plugin.set_protocol_type(&mut node, "FLOAT32", &mut state).unwrap();
        assert_eq!(node.config.node_type, NodeType::Float);
        match &node.protocol_options {
            EditableNodeProtocolOptions::ModbusRtu(o) => {
                assert_eq!(o.data_type, ModbusDataType::Float32);
                assert_eq!(o.endian_mode, Some(EndianMode::BigEndian));
            }
            other => panic!("unexpected options {other:?}"),
        }
        assert_eq!(state.previous_type, Some(ModbusDataType::Float32));

        assert_eq!(
            plugin.set_protocol_type(&mut node, "DOUBLE", &mut state),
            Err(ProtocolError::UnsupportedType { protocol: Protocol::ModbusRtu, tag: "DOUBLE".to_string() })
        );
    }

    #[test]
    fn test_type_tags_match_data_types() {
        let plugin = ModbusRtuPlugin;
        let mut node = editable_node(options(ModbusDataType::Int16, ModbusFunction::ReadHoldingRegisters));
        let mut state = EditingState::for_options(&options(ModbusDataType::Int16, ModbusFunction::ReadHoldingRegisters));

        for data_type in [ModbusDataType::Bool, ModbusDataType::Uint32, ModbusDataType::Float64, ModbusDataType::Int16] {
            let tag = data_type.as_str();
            assert_eq!(ModbusDataType::from_str(tag), Some(data_type));
            plugin.set_protocol_type(&mut node, tag, &mut state).unwrap();
            assert_eq!(node.config.node_type, data_type.generic());
            assert_eq!(plugin.convert_type_to_generic(&node.protocol_options), Ok(data_type.generic()));
        }
    }

    #[test]
    fn test_communication_id_grammar() {
        let plugin = ModbusRtuPlugin;
        assert!(plugin.validate_communication_id("0x0064"));
        assert!(!plugin.validate_communication_id("100"));
    }
}
