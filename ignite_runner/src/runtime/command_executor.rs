use std::{
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use log::{debug, trace};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandExecutorError {
    #[error("Unable to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command \"{command}\" failed with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Command \"{0}\" was terminated by a signal")]
    Terminated(String),
}

pub trait CommandExecutor {
    /// Runs `program` to completion and returns its trimmed stdout.
    /// A non-zero exit is reported as [`CommandExecutorError::Failed`].
    fn execute(&self, program: &Path, args: &[String]) -> Result<String, CommandExecutorError>;

    /// Runs `program` with the caller's stdio attached and returns its exit code.
    fn execute_foreground(&self, program: &Path, args: &[String])
        -> Result<i32, CommandExecutorError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    fn command_line(program: &Path, args: &[String]) -> String {
        let mut line = program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn spawn_error(program: &Path) -> impl FnOnce(std::io::Error) -> CommandExecutorError + '_ {
        move |source| CommandExecutorError::Spawn {
            program: program.display().to_string(),
            source,
        }
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, program: &Path, args: &[String]) -> Result<String, CommandExecutorError> {
        let mut command = Command::new(program);
        command.args(args);
        command.stdin(Stdio::null());
        debug!("Executing command: {:?}", command);

        let output = command.output().map_err(Self::spawn_error(program))?;
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        trace!("Command {:?} returned: {:?}", command, stdout);

        if !output.status.success() {
            return Err(CommandExecutorError::Failed {
                command: Self::command_line(program, args),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(stdout)
    }

    fn execute_foreground(
        &self,
        program: &Path,
        args: &[String],
    ) -> Result<i32, CommandExecutorError> {
        let mut command = Command::new(program);
        command.args(args);
        command.stdin(Stdio::inherit());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());
        debug!("Executing command in foreground: {:?}", command);

        let status = command.status().map_err(Self::spawn_error(program))?;
        trace!("Command {:?} exited with: {}", command, status);
        status
            .code()
            .ok_or_else(|| CommandExecutorError::Terminated(Self::command_line(program, args)))
    }
}
