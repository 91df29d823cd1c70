use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogVariable};

const CONFIG_PATHS: [&str; 2] = ["config/meterconf.yaml", "meterconf.yaml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Unable to parse config file: {0}")]
    Parse(#[from] serde_yml::Error),
    #[error("Invalid limits: {0}")]
    Limits(String),
}

fn decimal_places_min_default() -> u8 { return 0 }
fn decimal_places_max_default() -> u8 { return 6 }
fn logging_period_min_default() -> u32 { return 1 }
fn logging_period_max_default() -> u32 { return 1440 }

/// Bounds of the numeric node settings
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ValidationLimits {
    #[serde(default="decimal_places_min_default")]
    pub decimal_places_min: u8,
    #[serde(default="decimal_places_max_default")]
    pub decimal_places_max: u8,
    /* minutes */
    #[serde(default="logging_period_min_default")]
    pub logging_period_min: u32,
    #[serde(default="logging_period_max_default")]
    pub logging_period_max: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        return ValidationLimits {
            decimal_places_min: decimal_places_min_default(),
            decimal_places_max: decimal_places_max_default(),
            logging_period_min: logging_period_min_default(),
            logging_period_max: logging_period_max_default(),
        }
    }
}

fn limits_default() -> ValidationLimits { return ValidationLimits::default() }
fn extra_variables_default() -> Vec<CatalogVariable> { return Vec::new() }

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default="limits_default")]
    pub limits: ValidationLimits,
    #[serde(default="extra_variables_default")]
    pub extra_variables: Vec<CatalogVariable>,
}

impl Default for Config {
    fn default() -> Self {
        return Config { limits: limits_default(), extra_variables: extra_variables_default() }
    }
}

impl Config {
    /// Reads the first config file found, built-in defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        for path in CONFIG_PATHS {
            if Path::new(path).is_file() {
                return Config::load_from(path);
            }
        }

        info!("No config found on {} or {}, using defaults", CONFIG_PATHS[0], CONFIG_PATHS[1]);
        return Ok(Config::default());
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| ConfigError::Io { path: path.to_path_buf(), source };

        let mut file = File::open(path).map_err(io_error)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(io_error)?;

        let config = Config::from_yaml(&contents)?;
        info!("Config loaded from {}", path.display());
        return Ok(config);
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        /* an empty file is a valid config */
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yml::from_str(contents)?;
        let limits = &config.limits;
        if limits.decimal_places_min > limits.decimal_places_max {
            return Err(ConfigError::Limits("decimal_places_min is above decimal_places_max".to_string()));
        }
        if limits.logging_period_min > limits.logging_period_max {
            return Err(ConfigError::Limits("logging_period_min is above logging_period_max".to_string()));
        }

        debug!("Config has {} extra variables", config.extra_variables.len());
        return Ok(config);
    }

    /// Built-in variables merged with the configured ones
    pub fn catalog(&self) -> Catalog {
        return Catalog::with_overrides(&self.extra_variables);
    }
}
