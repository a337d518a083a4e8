pub mod command_executor;
pub mod ignite;
