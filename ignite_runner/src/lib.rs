
pub mod cli;
pub mod machine_configuration;
pub mod runtime;
