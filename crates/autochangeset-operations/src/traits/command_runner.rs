use std::path::Path;

use crate::Result;

pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` in `dir` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or exits unsuccessfully.
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> Result<String>;
}
