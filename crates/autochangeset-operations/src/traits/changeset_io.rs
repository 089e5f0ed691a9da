use std::path::{Path, PathBuf};

use autochangeset_core::Changeset;

use crate::Result;

pub trait ChangesetWriter: Send + Sync {
    /// Writes `changeset` into `changeset_dir`, creating the directory if needed, and
    /// returns the path of the new file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be created.
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<PathBuf>;
}
