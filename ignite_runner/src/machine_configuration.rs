use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CPUS: u32 = 2;
pub const DEFAULT_MEMORY: &str = "1GB";
pub const DEFAULT_DISK_SIZE: &str = "4GB";
pub const DEFAULT_KERNEL: &str = "weaveworks/ignite-kernel:4.19.47";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read machine config {0}: {1}")]
    Read(String, #[source] std::io::Error),
    #[error("Invalid machine config {0}: {1}")]
    InvalidConfigFile(String, #[source] serde_yaml::Error),
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    pub image: String,
    #[serde(default)]
    pub port_mappings: Vec<PortMapping>,
    #[serde(default)]
    pub ignite: Option<IgniteConfig>,
}

/// Runtime specific part of a machine. Zero or empty values are replaced
/// with runtime defaults by [`MachineSpec::ignite_config`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IgniteConfig {
    pub cpus: u32,
    pub memory: String,
    pub disk_size: String,
    pub kernel: String,
    pub copy_files: Option<Vec<String>>,
}

/// A host port of zero leaves the mapping unassigned.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    #[serde(default)]
    pub host_port: u16,
    pub container_port: u16,
}

impl MachineSpec {
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<MachineSpec, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|err| ConfigError::Read(path.display().to_string(), err))?;
        serde_yaml::from_str(&content)
            .map_err(|err| ConfigError::InvalidConfigFile(path.display().to_string(), err))
    }

    pub fn ignite_config(&self) -> IgniteConfig {
        let mut config = self.ignite.clone().unwrap_or_default();
        if config.cpus == 0 {
            config.cpus = DEFAULT_CPUS;
        }
        if config.memory.is_empty() {
            config.memory = String::from(DEFAULT_MEMORY);
        }
        if config.disk_size.is_empty() {
            config.disk_size = String::from(DEFAULT_DISK_SIZE);
        }
        if config.kernel.is_empty() {
            config.kernel = String::from(DEFAULT_KERNEL);
        }
        config
    }
}
