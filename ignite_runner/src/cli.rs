use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::runtime::ignite::IGNITE_NAME;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the ignite binary
    #[arg(short, long, default_value = IGNITE_NAME)]
    pub ignite_path: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a machine from a YAML machine specification
    Create {
        /// Machine specification file
        #[arg(short, long)]
        config: PathBuf,

        /// Name of the machine
        #[arg(short, long)]
        name: String,

        /// Public key installed as root's authorized keys
        #[arg(short, long)]
        pub_key_path: PathBuf,
    },
    /// Check whether the runtime knows a machine
    IsCreated {
        /// Name of the machine
        #[arg(short, long)]
        name: String,
    },
}
