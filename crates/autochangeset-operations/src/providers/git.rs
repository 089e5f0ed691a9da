use std::path::{Path, PathBuf};

use autochangeset_core::CommitRecord;
use autochangeset_git::{LogQuery, Repository};

use crate::Result;
use crate::traits::GitProvider;

/// [`GitProvider`] backed by libgit2.
///
/// The workspace root may be a subdirectory of the repository; paths going in and out
/// are translated so callers only ever see workspace-relative paths.
pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

fn open(root: &Path) -> Result<(Repository, PathBuf)> {
    let repo = Repository::open(root)?;
    let prefix = workspace_prefix(repo.root(), root);
    Ok((repo, prefix))
}

fn workspace_prefix(repo_root: &Path, root: &Path) -> PathBuf {
    let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    canonical(root)
        .strip_prefix(canonical(repo_root))
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

impl GitProvider for Git2Provider {
    fn changed_files(&self, root: &Path, base: &str, head: &str) -> Result<Vec<PathBuf>> {
        let (repo, prefix) = open(root)?;
        Ok(repo
            .changed_files(base, head)?
            .into_iter()
            .filter_map(|path| path.strip_prefix(&prefix).ok().map(Path::to_path_buf))
            .collect())
    }

    fn latest_tag(&self, root: &Path) -> Result<Option<String>> {
        let (repo, _) = open(root)?;
        Ok(repo.latest_tag()?)
    }

    fn log(&self, root: &Path, query: LogQuery<'_>) -> Result<Vec<CommitRecord>> {
        let (repo, prefix) = open(root)?;
        let scoped = query.path.map(|path| prefix.join(path));
        let query = LogQuery {
            path: scoped.as_deref().or(query.path),
            ..query
        };

        Ok(repo
            .log(query)?
            .into_iter()
            .map(|commit| CommitRecord::new(commit.sha, commit.message))
            .collect())
    }

    fn file_diff(&self, root: &Path, commit: &str, path: &Path) -> Result<String> {
        let (repo, prefix) = open(root)?;
        Ok(repo.file_diff(commit, &prefix.join(path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_of_repository_root_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");

        assert_eq!(workspace_prefix(dir.path(), dir.path()), PathBuf::new());
    }

    #[test]
    fn prefix_of_subdirectory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let sub = dir.path().join("js");
        std::fs::create_dir_all(&sub).expect("create subdir");

        assert_eq!(workspace_prefix(dir.path(), &sub), PathBuf::from("js"));
    }

    #[test]
    fn opening_outside_a_repository_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let result = Git2Provider::new().latest_tag(dir.path());

        assert!(result.is_err());
    }
}
