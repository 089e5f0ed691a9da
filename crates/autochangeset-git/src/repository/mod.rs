mod diff;
mod log;
mod tag;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// Opens the repository containing `path`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if no repository contains `path`, and
    /// [`GitError::BareRepository`] if it has no working tree to hold packages.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        let Some(workdir) = inner.workdir() else {
            return Err(GitError::BareRepository {
                path: inner.path().to_path_buf(),
            });
        };
        let root = dunce::simplified(workdir).to_path_buf();

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn resolve_commit(&self, refspec: &str) -> Result<git2::Commit<'_>> {
        let not_found = || GitError::RefNotFound {
            refspec: refspec.to_string(),
        };

        self.inner
            .revparse_single(refspec)
            .map_err(|_| not_found())?
            .peel_to_commit()
            .map_err(|_| not_found())
    }

    /// Diff of `commit` against its first parent (or the empty tree for a root commit),
    /// optionally restricted to `path`.
    pub(crate) fn commit_diff(
        &self,
        commit: &git2::Commit<'_>,
        path: Option<&Path>,
    ) -> Result<git2::Diff<'_>> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = git2::DiffOptions::new();
        if let Some(path) = path {
            opts.pathspec(path);
        }

        Ok(self
            .inner
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?)
    }
}
