use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use super::ValidationContext;
use crate::grammar::validate_variable_name;
use crate::models::{EditableAlarm, EditableNode, NodeType, Phase, Protocol};
use crate::protocols::NodeOptionsValidation;

/// One flag per checked field of a node
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeValidation {
    pub variable_name: bool,
    pub unit: bool,
    pub communication_id: bool,
    pub protocol: bool,
    #[serde(rename = "type")]
    pub node_type: bool,
    pub phase: bool,
    pub decimal_places: bool,
    pub logging_period: bool,
    pub min_alarm: bool,
    pub max_alarm: bool,
    pub calculated: bool,
    pub incremental: bool,
    pub calculate_increment: bool,
    pub positive_incremental: bool,
    pub options: NodeOptionsValidation,
}

impl NodeValidation {
    fn fields(&self) -> [(&'static str, bool); 15] {
        [
            ("node.errors.variable_name", self.variable_name),
            ("node.errors.type", self.node_type),
            ("node.errors.unit", self.unit),
            ("node.errors.phase", self.phase),
            ("node.errors.protocol", self.protocol),
            ("node.errors.communication_id", self.communication_id),
            ("node.errors.options", self.options.is_valid()),
            ("node.errors.decimal_places", self.decimal_places),
            ("node.errors.logging_period", self.logging_period),
            ("node.errors.min_alarm", self.min_alarm),
            ("node.errors.max_alarm", self.max_alarm),
            ("node.errors.calculated", self.calculated),
            ("node.errors.incremental", self.incremental),
            ("node.errors.calculate_increment", self.calculate_increment),
            ("node.errors.positive_incremental", self.positive_incremental),
        ]
    }

    pub fn is_valid(&self) -> bool {
        self.fields().iter().all(|(_, valid)| *valid)
    }

    /// Message key of the first failing field in form order
    pub fn first_error(&self) -> Option<&'static str> {
        self.fields().iter().find(|(_, valid)| !*valid).map(|(key, _)| *key)
    }

    /// Message keys of all failing fields in form order
    pub fn errors(&self) -> Vec<&'static str> {
        self.fields().iter().filter(|(_, valid)| !*valid).map(|(key, _)| *key).collect()
    }
}

/// How often each display name occurs per section
#[derive(Debug, Clone, Default)]
pub struct NodeSections {
    counts: HashMap<Phase, HashMap<String, usize>>,
}

impl NodeSections {
    pub fn from_nodes(nodes: &[EditableNode]) -> Self {
        let mut counts: HashMap<Phase, HashMap<String, usize>> = HashMap::new();
        for node in nodes {
            *counts
                .entry(node.phase)
                .or_default()
                .entry(node.display_name.clone())
                .or_insert(0) += 1;
        }
        NodeSections { counts }
    }

    pub fn count(&self, phase: Phase, display_name: &str) -> usize {
        self.counts
            .get(&phase)
            .and_then(|names| names.get(display_name))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_duplicated(&self, phase: Phase, display_name: &str) -> bool {
        self.count(phase, display_name) >= 2
    }
}

fn in_range<T: std::str::FromStr + PartialOrd>(value: &str, min: T, max: T) -> bool {
    match value.parse::<T>() {
        Ok(v) => v >= min && v <= max,
        Err(_) => false,
    }
}

fn validate_alarm(alarm: &EditableAlarm, node_type: NodeType) -> bool {
    if !alarm.enabled {
        return true;
    }

    match node_type {
        NodeType::Float => matches!(alarm.value.parse::<f64>(), Ok(v) if v.is_finite()),
        NodeType::Int => alarm.value.parse::<i64>().is_ok(),
        NodeType::Bool | NodeType::String => false,
    }
}

pub fn validate_node(node: &EditableNode, sections: &NodeSections, ctx: &ValidationContext) -> NodeValidation {
    let config = &node.config;
    let name = node.display_name.as_str();
    let entry = if config.custom { None } else { ctx.catalog.get(name) };
    let plugin = ctx.registry.get(node.protocol).ok();

    let variable_name = !sections.is_duplicated(node.phase, name)
        && if config.custom {
            validate_variable_name(name) && !ctx.catalog.contains(name)
        } else {
            entry.is_some()
        };

    let unit = if config.custom {
        match config.node_type {
            NodeType::Bool | NodeType::String => config.unit.is_empty(),
            NodeType::Int | NodeType::Float => !config.unit.trim().is_empty(),
        }
    } else {
        entry.map_or(false, |e| e.units.contains(&config.unit))
    };

    /* only the grammar is checked, for Modbus the id and the option address are independent fields */
    let communication_id = plugin.map_or(false, |p| p.validate_communication_id(&node.communication_id));

    let protocol = if config.calculated {
        node.protocol == Protocol::None
    } else {
        plugin.is_some()
    };

    let node_type = config.custom || entry.map_or(false, |e| e.types.contains(&config.node_type));
    let phase = config.custom || entry.map_or(false, |e| e.phases.contains(&node.phase));

    let limits = ctx.limits;
    let decimal_places = if config.node_type.is_numeric() {
        in_range::<u8>(&config.decimal_places, limits.decimal_places_min, limits.decimal_places_max)
    } else {
        config.decimal_places.is_empty()
    };

    let logging_period = !config.logging
        || in_range::<u32>(&config.logging_period, limits.logging_period_min, limits.logging_period_max);

    let calculated = if config.custom {
        !config.calculated
    } else {
        !config.calculated || entry.map_or(false, |e| e.can_be_virtual)
    };

    let incremental = config.custom || entry.map_or(false, |e| e.is_incremental == config.incremental);

    let options = match plugin {
        Some(p) => p.validate_node_options(&node.protocol_options),
        None => NodeOptionsValidation::Mismatch,
    };

    let validation = NodeValidation {
        variable_name,
        unit,
        communication_id,
        protocol,
        node_type,
        phase,
        decimal_places,
        logging_period,
        min_alarm: validate_alarm(&config.min_alarm, config.node_type),
        max_alarm: validate_alarm(&config.max_alarm, config.node_type),
        calculated,
        incremental,
        calculate_increment: true,
        positive_incremental: true,
        options,
    };

    if let Some(key) = validation.first_error() {
        debug!("Node {} in {} is invalid: {}", name, node.phase.as_str(), key);
    }

    validation
}

/// Recompute the flags of every node
pub fn update_nodes_validation(nodes: &mut [EditableNode], sections: &NodeSections, ctx: &ValidationContext) {
    for node in nodes.iter_mut() {
        node.validation = validate_node(node, sections, ctx);
    }
}

pub fn get_all_nodes_validation(nodes: &[EditableNode]) -> bool {
    nodes.iter().all(|n| n.validation.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::ValidationLimits;
    use crate::models::EditableNodeConfig;
    use crate::protocols::{
        EditableModbusNodeOptions, EditableNodeProtocolOptions, EndianMode, ModbusDataType,
        ModbusFunction, PluginRegistry,
    };

    fn voltage(phase: Phase) -> EditableNode {
        EditableNode {
            display_name: "voltage".to_string(),
            protocol: Protocol::ModbusRtu,
            communication_id: "0x0100".to_string(),
            phase,
            protocol_options: EditableNodeProtocolOptions::ModbusRtu(EditableModbusNodeOptions {
                data_type: ModbusDataType::Float32,
                function: ModbusFunction::ReadInputRegisters,
                address: "256".to_string(),
                endian_mode: Some(EndianMode::BigEndian),
                bit: None,
            }),
            config: EditableNodeConfig {
                node_type: NodeType::Float,
                unit: "V".to_string(),
                decimal_places: "2".to_string(),
                logging: true,
                logging_period: "15".to_string(),
                ..EditableNodeConfig::default()
            },
            validation: NodeValidation::default(),
        }
    }

    fn custom(name: &str, node_type: NodeType, unit: &str) -> EditableNode {
        let mut node = voltage(Phase::Generic);
        node.display_name = name.to_string();
        node.config.custom = true;
        node.config.node_type = node_type;
        node.config.unit = unit.to_string();
        if !node_type.is_numeric() {
            node.config.decimal_places = String::new();
        }
        node
    }

    fn check(nodes: &mut Vec<EditableNode>) {
        let catalog = Catalog::new();
        let registry = PluginRegistry::new();
        let limits = ValidationLimits::default();
        let ctx = ValidationContext::new(&catalog, &registry, &limits);
        let sections = NodeSections::from_nodes(nodes);
        update_nodes_validation(nodes, &sections, &ctx);
    }

    #[test]
    fn test_catalog_node_is_valid() {
        let mut nodes = vec![voltage(Phase::L1)];
        check(&mut nodes);
        assert_eq!(nodes[0].validation.first_error(), None);
        assert!(get_all_nodes_validation(&nodes));
    }

    #[test]
    fn test_duplicate_names_in_same_section() {
        let mut nodes = vec![voltage(Phase::L1), voltage(Phase::L1), voltage(Phase::L2)];
        check(&mut nodes);
        assert!(!nodes[0].validation.variable_name);
        assert!(!nodes[1].validation.variable_name);
        assert!(nodes[2].validation.variable_name);
        assert!(!get_all_nodes_validation(&nodes));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut nodes = vec![voltage(Phase::L1), voltage(Phase::L1), custom("boiler", NodeType::Float, "")];
        check(&mut nodes);
        let first: Vec<NodeValidation> = nodes.iter().map(|n| n.validation.clone()).collect();
        check(&mut nodes);
        let second: Vec<NodeValidation> = nodes.iter().map(|n| n.validation.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_names() {
        let mut nodes = vec![
            custom("boiler_temp", NodeType::Float, "°C"),
            custom("voltage", NodeType::Float, "V"),
            custom("2nd", NodeType::Float, "V"),
        ];
        nodes[1].phase = Phase::L3;
        check(&mut nodes);
        assert!(nodes[0].validation.variable_name);
        assert!(!nodes[1].validation.variable_name);
        assert!(!nodes[2].validation.variable_name);
    }

    #[test]
    fn test_unknown_catalog_name() {
        let mut node = voltage(Phase::L1);
        node.display_name = "boiler_temp".to_string();
        let mut nodes = vec![node];
        check(&mut nodes);
        let v = &nodes[0].validation;
        assert!(!v.variable_name);
        assert!(!v.unit);
        assert!(!v.node_type);
        assert_eq!(v.first_error(), Some("node.errors.variable_name"));
    }

    #[test]
    fn test_units() {
        let mut nodes = vec![
            custom("flag", NodeType::Bool, ""),
            custom("label", NodeType::String, "x"),
            custom("level", NodeType::Int, ""),
            voltage(Phase::L1),
        ];
        nodes[0].protocol_options = EditableNodeProtocolOptions::ModbusRtu(EditableModbusNodeOptions {
            data_type: ModbusDataType::Bool,
            function: ModbusFunction::ReadCoils,
            address: "1".to_string(),
            endian_mode: None,
            bit: None,
        });
        nodes[3].config.unit = "A".to_string();
        check(&mut nodes);
        assert!(nodes[0].validation.unit);
        assert!(!nodes[1].validation.unit);
        assert!(!nodes[2].validation.unit);
        assert!(!nodes[3].validation.unit);
    }

    #[test]
    fn test_type_and_phase_applicability() {
        let mut freq = voltage(Phase::L1);
        freq.display_name = "frequency".to_string();
        freq.config.unit = "Hz".to_string();
        let mut volt = voltage(Phase::L2);
        volt.config.node_type = NodeType::String;
        volt.config.decimal_places = String::new();
        let mut nodes = vec![freq, volt];
        check(&mut nodes);
        assert!(!nodes[0].validation.phase);
        assert!(nodes[0].validation.node_type);
        assert!(!nodes[1].validation.node_type);
        assert!(nodes[1].validation.decimal_places);
    }

    #[test]
    fn test_communication_id_and_protocol() {
        let mut bad_id = voltage(Phase::L1);
        bad_id.communication_id = "256".to_string();

        let mut calculated = voltage(Phase::L2);
        calculated.display_name = "active_power".to_string();
        calculated.config.unit = "W".to_string();
        calculated.config.calculated = true;

        let mut virtual_ok = calculated.clone();
        virtual_ok.phase = Phase::Generic;
        virtual_ok.protocol = Protocol::None;
        virtual_ok.communication_id = String::new();
        virtual_ok.protocol_options = EditableNodeProtocolOptions::None;

        let mut nodes = vec![bad_id, calculated, virtual_ok];
        check(&mut nodes);
        assert!(!nodes[0].validation.communication_id);
        assert!(nodes[0].validation.protocol);
        assert!(!nodes[1].validation.protocol);
        assert!(nodes[1].validation.calculated);
        assert!(nodes[2].validation.is_valid(), "{:?}", nodes[2].validation.errors());
    }

    #[test]
    fn test_modbus_id_and_address_checked_separately() {
        let mut node = voltage(Phase::L1);
        node.communication_id = "0x0064".to_string();
        if let EditableNodeProtocolOptions::ModbusRtu(o) = &mut node.protocol_options {
            o.address = "300".to_string();
        }
        let mut bad_address = node.clone();
        bad_address.phase = Phase::L2;
        if let EditableNodeProtocolOptions::ModbusRtu(o) = &mut bad_address.protocol_options {
            o.address = "0x0064".to_string();
        }

        let mut nodes = vec![node, bad_address];
        check(&mut nodes);
        assert!(nodes[0].validation.is_valid());
        assert!(nodes[1].validation.communication_id);
        assert!(!nodes[1].validation.options.is_valid());
    }

    #[test]
    fn test_unregistered_protocol() {
        let catalog = Catalog::new();
        let registry = PluginRegistry::with_protocols(&[Protocol::None, Protocol::OpcUa]);
        let limits = ValidationLimits::default();
        let ctx = ValidationContext::new(&catalog, &registry, &limits);
        let mut nodes = vec![voltage(Phase::L1)];
        let sections = NodeSections::from_nodes(&nodes);
        update_nodes_validation(&mut nodes, &sections, &ctx);
        let v = &nodes[0].validation;
        assert!(!v.protocol);
        assert!(!v.communication_id);
        assert_eq!(v.options, NodeOptionsValidation::Mismatch);
    }

    #[test]
    fn test_virtual_and_incremental_flags() {
        let mut volt = voltage(Phase::L1);
        volt.config.calculated = true;
        volt.protocol = Protocol::None;

        let mut energy = voltage(Phase::Generic);
        energy.display_name = "active_energy".to_string();
        energy.config.unit = "kWh".to_string();
        energy.config.incremental = false;

        let mut custom_virtual = custom("derived", NodeType::Float, "W");
        custom_virtual.config.calculated = true;
        custom_virtual.config.incremental = true;

        let mut nodes = vec![volt, energy, custom_virtual];
        check(&mut nodes);
        assert!(!nodes[0].validation.calculated);
        assert!(!nodes[1].validation.incremental);
        assert!(!nodes[2].validation.calculated);
        assert!(nodes[2].validation.incremental);
    }

    #[test]
    fn test_decimal_places_and_logging_period() {
        let mut a = voltage(Phase::L1);
        a.config.decimal_places = String::new();
        a.config.logging_period = "0".to_string();
        let mut b = voltage(Phase::L2);
        b.config.decimal_places = "7".to_string();
        b.config.logging = false;
        b.config.logging_period = "not a number".to_string();
        let mut c = custom("text", NodeType::String, "");
        c.config.decimal_places = "2".to_string();

        let mut nodes = vec![a, b, c];
        check(&mut nodes);
        assert!(!nodes[0].validation.decimal_places);
        assert!(!nodes[0].validation.logging_period);
        assert!(!nodes[1].validation.decimal_places);
        assert!(nodes[1].validation.logging_period);
        assert!(!nodes[2].validation.decimal_places);
    }

    #[test]
    fn test_alarms() {
        let mut float_node = voltage(Phase::L1);
        float_node.config.min_alarm = EditableAlarm { enabled: true, value: "207.5".to_string() };
        float_node.config.max_alarm = EditableAlarm { enabled: true, value: "abc".to_string() };

        let mut int_node = custom("counter_value", NodeType::Int, "pcs");
        int_node.config.min_alarm = EditableAlarm { enabled: true, value: "1.5".to_string() };
        int_node.config.max_alarm = EditableAlarm { enabled: false, value: "abc".to_string() };

        let mut bool_node = custom("alarm_flag", NodeType::Bool, "");
        bool_node.config.min_alarm = EditableAlarm { enabled: true, value: "1".to_string() };

        let mut nodes = vec![float_node, int_node, bool_node];
        check(&mut nodes);
        assert!(nodes[0].validation.min_alarm);
        assert!(!nodes[0].validation.max_alarm);
        assert!(!nodes[1].validation.min_alarm);
        assert!(nodes[1].validation.max_alarm);
        assert!(!nodes[2].validation.min_alarm);
    }

    #[test]
    fn test_sections_count() {
        let nodes = vec![voltage(Phase::L1), voltage(Phase::L1), voltage(Phase::L3)];
        let sections = NodeSections::from_nodes(&nodes);
        assert_eq!(sections.count(Phase::L1, "voltage"), 2);
        assert_eq!(sections.count(Phase::L3, "voltage"), 1);
        assert_eq!(sections.count(Phase::L2, "voltage"), 0);
        assert!(sections.is_duplicated(Phase::L1, "voltage"));
    }
}
