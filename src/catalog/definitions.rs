use super::CatalogVariable;
use crate::models::{NodeType, Phase};
use std::collections::HashMap;

const ALL_PHASES: [Phase; 4] = [Phase::Generic, Phase::L1, Phase::L2, Phase::L3];

fn variable(
    name: &str,
    types: &[NodeType],
    phases: &[Phase],
    units: &[&str],
    can_be_virtual: bool,
    is_incremental: bool,
) -> CatalogVariable {
    CatalogVariable {
        name: name.to_string(),
        types: types.to_vec(),
        phases: phases.to_vec(),
        units: units.iter().map(|u| u.to_string()).collect(),
        can_be_virtual,
        is_incremental,
    }
}

pub fn get_default_variables() -> HashMap<String, CatalogVariable> {
    let mut variables = HashMap::new();
    let numeric = [NodeType::Float, NodeType::Int];

    // Instantaneous values
    for v in [
        variable("voltage", &[NodeType::Float], &ALL_PHASES, &["V", "kV"], false, false),
        variable("current", &[NodeType::Float], &ALL_PHASES, &["A", "mA"], false, false),
        variable("active_power", &numeric, &ALL_PHASES, &["W", "kW"], true, false),
        variable("reactive_power", &numeric, &ALL_PHASES, &["var", "kvar"], true, false),
        variable("apparent_power", &numeric, &ALL_PHASES, &["VA", "kVA"], true, false),
        variable("power_factor", &[NodeType::Float], &ALL_PHASES, &[""], false, false),
        variable("frequency", &[NodeType::Float], &[Phase::Generic], &["Hz"], false, false),
        variable("voltage_thd", &[NodeType::Float], &ALL_PHASES, &["%"], false, false),
        variable("current_thd", &[NodeType::Float], &ALL_PHASES, &["%"], false, false),
    ] {
        variables.insert(v.name.clone(), v);
    }

    // Counters
    for v in [
        variable("active_energy", &numeric, &ALL_PHASES, &["Wh", "kWh", "MWh"], true, true),
        variable("reactive_energy", &numeric, &ALL_PHASES, &["varh", "kvarh"], true, true),
        variable("apparent_energy", &numeric, &ALL_PHASES, &["VAh", "kVAh"], true, true),
        variable("exported_active_energy", &numeric, &[Phase::Generic], &["Wh", "kWh", "MWh"], false, true),
        variable("imported_active_energy", &numeric, &[Phase::Generic], &["Wh", "kWh", "MWh"], false, true),
    ] {
        variables.insert(v.name.clone(), v);
    }

    variables
}
