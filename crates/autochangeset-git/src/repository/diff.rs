use std::path::{Path, PathBuf};

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Paths changed between two revisions, relative to the repository root.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either revision cannot be resolved.
    pub fn changed_files(&self, base: &str, head: &str) -> Result<Vec<PathBuf>> {
        let base_tree = self.resolve_commit(base)?.tree()?;
        let head_tree = self.resolve_commit(head)?.tree()?;

        let diff = self
            .inner
            .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), None)?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;
            paths.push(path);
        }

        Ok(paths)
    }

    /// Unified diff text of `path` as changed by `commit`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if the commit cannot be resolved.
    pub fn file_diff(&self, commit: &str, path: &Path) -> Result<String> {
        let commit = self.resolve_commit(commit)?;
        let diff = self.commit_diff(&commit, Some(path))?;

        let mut text = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                text.push(line.origin());
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(text)
    }
}
