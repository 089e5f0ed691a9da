use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
}

/// Selects commits reachable from `HEAD`, newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogQuery<'a> {
    /// Exclude this revision and its ancestors.
    pub since: Option<&'a str>,
    /// Only commits whose diff against their first parent touches this path.
    pub path: Option<&'a Path>,
    pub limit: Option<usize>,
}

impl<'a> LogQuery<'a> {
    #[must_use]
    pub fn since(mut self, revision: &'a str) -> Self {
        self.since = Some(revision);
        self
    }

    #[must_use]
    pub fn path(mut self, path: &'a Path) -> Self {
        self.path = Some(path);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
