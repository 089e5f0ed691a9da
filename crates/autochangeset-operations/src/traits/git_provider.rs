use std::path::{Path, PathBuf};

use autochangeset_core::CommitRecord;
use autochangeset_git::LogQuery;

use crate::Result;

/// Version-control queries, all relative to the workspace root.
pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or a revision is unknown.
    fn changed_files(&self, root: &Path, base: &str, head: &str) -> Result<Vec<PathBuf>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or described.
    fn latest_tag(&self, root: &Path) -> Result<Option<String>>;

    /// Commits matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the history walk fails.
    fn log(&self, root: &Path, query: LogQuery<'_>) -> Result<Vec<CommitRecord>>;

    /// Unified diff of `path` in `commit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the commit is unknown.
    fn file_diff(&self, root: &Path, commit: &str, path: &Path) -> Result<String>;
}
