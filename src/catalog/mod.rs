use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{NodeType, Phase};

pub mod definitions;

/// A predefined measurement a node may be named after
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogVariable {
    pub name: String,
    pub types: Vec<NodeType>,
    pub phases: Vec<Phase>,
    pub units: Vec<String>,
    #[serde(default)]
    pub can_be_virtual: bool,
    #[serde(default)]
    pub is_incremental: bool,
}

/// Immutable lookup of the default variables
#[derive(Debug, Clone)]
pub struct Catalog {
    variables: HashMap<String, CatalogVariable>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog { variables: definitions::get_default_variables() }
    }

    /// Built-in variables, where user provided definitions win by name
    pub fn with_overrides(extra: &[CatalogVariable]) -> Self {
        let mut catalog = Catalog::new();
        for variable in extra {
            if catalog.variables.contains_key(&variable.name) {
                info!("Using user provided definition of variable {}", variable.name);
            } else {
                debug!("Adding variable {} to the catalog", variable.name);
            }
            catalog.variables.insert(variable.name.clone(), variable.clone());
        }
        return catalog;
    }

    pub fn get(&self, name: &str) -> Option<&CatalogVariable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Names sorted for display in a selection list
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }

    /// Variables that may be listed in the given section
    pub fn variables_for_phase(&self, phase: Phase) -> Vec<&CatalogVariable> {
        let mut vars: Vec<&CatalogVariable> = self
            .variables
            .values()
            .filter(|v| v.phases.contains(&phase))
            .collect();
        vars.sort_by(|a, b| a.name.cmp(&b.name));
        vars
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new();
        assert!(catalog.contains("voltage"));
        assert!(!catalog.contains("Voltage"));
        assert_eq!(catalog.get("current").unwrap().units, vec!["A".to_string(), "mA".to_string()]);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_overrides_replace_by_name() {
        let extra = vec![
            CatalogVariable {
                name: "voltage".to_string(),
                types: vec![NodeType::Int],
                phases: vec![Phase::Generic],
                units: vec!["mV".to_string()],
                can_be_virtual: false,
                is_incremental: false,
            },
            CatalogVariable {
                name: "gas_volume".to_string(),
                types: vec![NodeType::Float],
                phases: vec![Phase::Generic],
                units: vec!["m3".to_string()],
                can_be_virtual: false,
                is_incremental: true,
            },
        ];
        let base = Catalog::new();
        let catalog = Catalog::with_overrides(&extra);
        assert_eq!(catalog.len(), base.len() + 1);
        assert_eq!(catalog.get("voltage").unwrap().units, vec!["mV".to_string()]);
        assert!(catalog.get("gas_volume").unwrap().is_incremental);
    }

    #[test]
    fn test_variables_for_phase() {
        let catalog = Catalog::new();
        let l1 = catalog.variables_for_phase(Phase::L1);
        assert!(l1.iter().any(|v| v.name == "voltage"));
        assert!(!l1.iter().any(|v| v.name == "frequency"));
        let names = catalog.names();
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }
}
