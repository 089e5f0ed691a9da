use crate::{CommitInfo, LogQuery, Result};

use super::Repository;

impl Repository {
    /// Commits reachable from `HEAD` matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if `HEAD` or `query.since` cannot be resolved.
    pub fn log(&self, query: LogQuery<'_>) -> Result<Vec<CommitInfo>> {
        if query.limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut walk = self.inner.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        walk.push_head()?;

        if let Some(since) = query.since {
            walk.hide(self.resolve_commit(since)?.id())?;
        }

        let mut commits = Vec::new();
        for oid in walk {
            let commit = self.inner.find_commit(oid?)?;

            if let Some(path) = query.path {
                if self.commit_diff(&commit, Some(path))?.deltas().len() == 0 {
                    continue;
                }
            }

            commits.push(CommitInfo {
                sha: commit.id().to_string(),
                message: String::from_utf8_lossy(commit.message_bytes())
                    .trim_end()
                    .to_string(),
            });

            if query.limit.is_some_and(|limit| commits.len() >= limit) {
                break;
            }
        }

        Ok(commits)
    }
}
