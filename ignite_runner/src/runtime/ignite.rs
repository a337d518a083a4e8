use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use thiserror::Error;

use super::command_executor::{CommandExecutor, CommandExecutorError};
use crate::machine_configuration::{MachineSpec, PortMapping};

pub const IGNITE_NAME: &str = "ignite";
const AUTHORIZED_KEYS_PATH: &str = "/root/.ssh/authorized_keys";

#[derive(Debug, Error)]
pub enum IgniteError {
    #[error("Invalid copy-file entry \"{0}\", expected \"source,dest\"")]
    InvalidCopyFile(String),
    #[error("Host port {host_port} of mapping {index} exceeds the port range once offset")]
    HostPortOutOfRange { host_port: u16, index: usize },
    #[error(transparent)]
    Execution(#[from] CommandExecutorError),
}

/// Creates machines by shelling out to the ignite runtime.
pub struct IgniteRunner<T: CommandExecutor> {
    executor: T,
    ignite_path: PathBuf,
}

impl<T: CommandExecutor> IgniteRunner<T> {
    pub fn new(executor: T, ignite_path: PathBuf) -> Self {
        Self {
            executor,
            ignite_path,
        }
    }

    /// Runs `ignite run` for `spec`, injecting `pub_key_path` as the guest's
    /// root authorized keys.
    ///
    /// The identifier printed by the runtime is not parsed, so on success the
    /// returned id is always empty.
    pub fn create(
        &self,
        name: &str,
        spec: &MachineSpec,
        pub_key_path: &Path,
    ) -> Result<String, IgniteError> {
        let args = Self::prepare_run_args(name, spec, pub_key_path)?;
        debug!("Creating machine: {} with args: {:?}", name, args);

        let output = self.executor.execute(&self.ignite_path, &args)?;
        trace!("Runtime output for machine {}: {:?}", name, output);
        Ok(String::new())
    }

    /// Existence probe: `ignite logs <name>` succeeds only for machines the
    /// runtime knows about. Any failure to run it counts as "not created".
    pub fn is_created(&self, name: &str) -> bool {
        let args = [String::from("logs"), name.to_string()];
        match self.executor.execute_foreground(&self.ignite_path, &args) {
            Ok(0) => true,
            Ok(exit_code) => {
                debug!("Machine {} logs exited with code {}", name, exit_code);
                false
            }
            Err(err) => {
                debug!("Unable to query logs of machine {}: {}", name, err);
                false
            }
        }
    }

    fn prepare_run_args(
        name: &str,
        spec: &MachineSpec,
        pub_key_path: &Path,
    ) -> Result<Vec<String>, IgniteError> {
        let config = spec.ignite_config();
        let mut copy_files = config.copy_files.unwrap_or_default();
        copy_files.push(format!(
            "{},{}",
            pub_key_path.display(),
            AUTHORIZED_KEYS_PATH
        ));

        let mut args = vec![
            String::from("run"),
            spec.image.clone(),
            format!("--name={}", name),
            format!("--cpus={}", config.cpus),
            format!("--memory={}", config.memory),
            format!("--size={}", config.disk_size),
            format!("--kernel-image={}", config.kernel),
        ];
        args.extend(setup_copy_files(&copy_files)?);
        args.extend(setup_ports(name, &spec.port_mappings)?);
        Ok(args)
    }
}

fn setup_copy_files(copy_files: &[String]) -> Result<Vec<String>, IgniteError> {
    copy_files
        .iter()
        .map(|entry| {
            entry
                .split_once(',')
                .map(|(src, dest)| format!("--copy-files={}:{}", src, dest))
                .ok_or_else(|| IgniteError::InvalidCopyFile(entry.clone()))
        })
        .collect()
}

// Host ports are shifted by the mapping's index so mappings sharing a host
// port do not collide.
fn setup_ports(name: &str, port_mappings: &[PortMapping]) -> Result<Vec<String>, IgniteError> {
    let mut args = Vec::with_capacity(port_mappings.len());
    for (index, mapping) in port_mappings.iter().enumerate() {
        if mapping.host_port == 0 {
            warn!(
                "Machine {}: port mapping {} has no host port, container port {} is not forwarded",
                name, index, mapping.container_port
            );
            continue;
        }
        let host_port = u16::try_from(index)
            .ok()
            .and_then(|offset| mapping.host_port.checked_add(offset))
            .ok_or(IgniteError::HostPortOutOfRange {
                host_port: mapping.host_port,
                index,
            })?;
        args.push(format!("--ports={}:{}", host_port, mapping.container_port));
    }
    Ok(args)
}
