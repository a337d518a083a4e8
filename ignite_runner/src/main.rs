use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use ignite_runner::{
    cli::{Cli, Command},
    machine_configuration::MachineSpec,
    runtime::{command_executor::SystemCommandExecutor, ignite::IgniteRunner},
};
use log::info;

fn main() -> anyhow::Result<ExitCode, Error> {
    env_logger::init();
    let cli = Cli::parse();
    let runner = IgniteRunner::new(SystemCommandExecutor, cli.ignite_path);

    match cli.command {
        Command::Create {
            config,
            name,
            pub_key_path,
        } => {
            let spec = MachineSpec::read_from_file(&config)?;
            runner.create(&name, &spec, &pub_key_path)?;
            info!("Machine {} created.", name);
            Ok(ExitCode::SUCCESS)
        }
        Command::IsCreated { name } => {
            let created = runner.is_created(&name);
            println!("{}", created);
            Ok(if created {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
