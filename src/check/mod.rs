//! Checks of stored device files, one device with its nodes per file.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Device, EditableDevice, EditableNode, Node};
use crate::protocols::ProtocolError;
use crate::validation::{update_device_validation, update_nodes_validation, NodeSections, ValidationContext};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Unable to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Unable to parse device file: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceFile {
    pub device: Device,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckReport {
    pub device: String,
    pub node_count: usize,
    /// Message keys, node keys prefixed with section and name
    pub failures: Vec<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn check_device_file(contents: &str, ctx: &ValidationContext) -> Result<CheckReport, CheckError> {
    let file: DeviceFile = serde_yml::from_str(contents)?;

    let mut device = EditableDevice::from_device(&file.device, ctx.registry)?;
    let mut nodes = file
        .nodes
        .iter()
        .map(|n| EditableNode::from_node(n, ctx.registry))
        .collect::<Result<Vec<_>, _>>()?;

    let sections = NodeSections::from_nodes(&nodes);
    update_nodes_validation(&mut nodes, &sections, ctx);
    update_device_validation(&mut device, &nodes, ctx);

    let mut failures: Vec<String> = Vec::new();
    /* the node aggregate is reported per node below */
    if let Some(key) = device.validation.first_error().filter(|k| *k != "device.errors.nodes") {
        failures.push(key.to_string());
    }
    if !device.validation.nodes {
        let phases = device.meter_type.phases();
        for node in nodes.iter() {
            let prefix = format!("{}/{}", node.phase.as_str(), node.display_name);
            /* a catalog entry refusing the phase already reports it below */
            if !phases.contains(&node.phase) && node.validation.phase {
                failures.push(format!("{}: node.errors.phase", prefix));
            }
            for key in node.validation.errors() {
                failures.push(format!("{}: {}", prefix, key));
            }
        }
    }

    debug!("Device {} checked with {} failures", device.name, failures.len());
    Ok(CheckReport { device: device.name, node_count: nodes.len(), failures })
}

pub fn check_device_path(path: &Path, ctx: &ValidationContext) -> Result<CheckReport, CheckError> {
    let contents = fs::read_to_string(path).map_err(|source| CheckError::Io { path: path.to_path_buf(), source })?;
    check_device_file(&contents, ctx)
}
