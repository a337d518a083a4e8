use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::PathBuf,
};

use ignite_runner::machine_configuration::{IgniteConfig, MachineSpec, PortMapping};
use tempfile::TempDir;

const ARGS_LOG: &str = "args.log";

/// Stand-in for the ignite binary. Records its arguments, prints an id for
/// `run` and succeeds on `logs` only for the machine called "existing".
const FAKE_IGNITE: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$(dirname "$0")/args.log"
case "$1" in
    run)
        if [ -n "$FAIL_RUN" ]; then
            echo "machine already exists" >&2
            exit 3
        fi
        echo "e5a3c1d2f4b60718"
        ;;
    logs)
        [ "$2" = "existing" ]
        ;;
    *)
        exit 2
        ;;
esac
"#;

pub struct FakeIgnite {
    dir: TempDir,
}

impl FakeIgnite {
    pub fn new() -> Self {
        Self::with_script(FAKE_IGNITE)
    }

    pub fn failing_run() -> Self {
        Self::with_script(&FAKE_IGNITE.replacen(
            "#!/bin/sh\n",
            "#!/bin/sh\nFAIL_RUN=1\n",
            1,
        ))
    }

    fn with_script(script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ignite");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("ignite")
    }

    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join(ARGS_LOG))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    pub fn was_invoked(&self) -> bool {
        self.dir.path().join(ARGS_LOG).exists()
    }
}

pub fn create_example_machine_spec() -> MachineSpec {
    MachineSpec {
        image: String::from("img:latest"),
        port_mappings: vec![
            PortMapping {
                host_port: 80,
                container_port: 8080,
            },
            PortMapping {
                host_port: 0,
                container_port: 9090,
            },
            PortMapping {
                host_port: 22,
                container_port: 2222,
            },
        ],
        ignite: Some(IgniteConfig {
            cpus: 2,
            memory: String::from("512MB"),
            disk_size: String::from("10GB"),
            kernel: String::from("vmlinux"),
            copy_files: Some(vec![String::from("/etc/hosts,/etc/hosts")]),
        }),
    }
}
