use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::CommandRunner;

/// [`CommandRunner`] spawning real processes and waiting for them to exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> Result<String> {
        debug!(program, ?args, dir = %dir.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| OperationError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(OperationError::CommandFailed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
