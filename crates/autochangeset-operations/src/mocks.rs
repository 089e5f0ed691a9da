use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use autochangeset_core::{BumpType, Changeset, CommitRecord, PackageInfo};
use autochangeset_git::{GitError, LogQuery};
use autochangeset_workspace::Workspace;
use semver::Version;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetWriter, CommandRunner, GitProvider};

fn git_failure(what: &str) -> OperationError {
    OperationError::Git(GitError::RefNotFound {
        refspec: what.to_string(),
    })
}

/// Parses `git log --oneline` style lines into commits.
///
/// # Panics
///
/// Panics if a line does not start with a hex hash.
#[must_use]
pub fn commits(lines: &[&str]) -> Vec<CommitRecord> {
    lines
        .iter()
        .map(|line| CommitRecord::from_oneline(line).expect("valid oneline"))
        .collect()
}

#[must_use]
pub fn package(name: &str, dir: &str) -> PackageInfo {
    PackageInfo {
        name: name.to_string(),
        version: Version::new(1, 0, 0),
        path: PathBuf::from("/mock/repo/packages").join(dir),
        relative_path: PathBuf::from("packages").join(dir),
    }
}

#[must_use]
pub fn workspace(packages: &[(&str, &str)]) -> Workspace {
    Workspace {
        root: PathBuf::from("/mock/repo"),
        packages_dir: PathBuf::from("packages"),
        packages: packages
            .iter()
            .map(|(name, dir)| package(name, dir))
            .collect(),
    }
}

#[derive(Hash, PartialEq, Eq)]
struct LogKey {
    since: Option<String>,
    path: Option<PathBuf>,
}

#[derive(Default)]
pub struct MockGitProvider {
    changed_files: Option<Vec<PathBuf>>,
    tag: Option<String>,
    tag_fails: bool,
    logs: HashMap<LogKey, Vec<CommitRecord>>,
    failing_logs: HashSet<Option<PathBuf>>,
    diffs: HashMap<(String, PathBuf), String>,
    log_queries: Mutex<Vec<(Option<String>, Option<PathBuf>, Option<usize>)>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_changed_files(mut self, files: &[&str]) -> Self {
        self.changed_files = Some(files.iter().map(PathBuf::from).collect());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    #[must_use]
    pub fn with_failing_tag(mut self) -> Self {
        self.tag_fails = true;
        self
    }

    /// Registers the result of a log query with the given `since` and `path`.
    #[must_use]
    pub fn with_log(mut self, since: Option<&str>, path: Option<&str>, lines: &[&str]) -> Self {
        let key = LogKey {
            since: since.map(String::from),
            path: path.map(PathBuf::from),
        };
        self.logs.insert(key, commits(lines));
        self
    }

    /// Makes every log query filtered on `path` fail.
    #[must_use]
    pub fn with_failing_log(mut self, path: Option<&str>) -> Self {
        self.failing_logs.insert(path.map(PathBuf::from));
        self
    }

    #[must_use]
    pub fn with_diff(mut self, commit: &str, path: &str, diff: &str) -> Self {
        self.diffs
            .insert((commit.to_string(), PathBuf::from(path)), diff.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn log_queries(&self) -> Vec<(Option<String>, Option<PathBuf>, Option<usize>)> {
        self.log_queries.lock().expect("lock poisoned").clone()
    }
}

impl GitProvider for MockGitProvider {
    fn changed_files(&self, _root: &Path, base: &str, _head: &str) -> Result<Vec<PathBuf>> {
        self.changed_files.clone().ok_or_else(|| git_failure(base))
    }

    fn latest_tag(&self, _root: &Path) -> Result<Option<String>> {
        if self.tag_fails {
            return Err(git_failure("describe"));
        }
        Ok(self.tag.clone())
    }

    fn log(&self, _root: &Path, query: LogQuery<'_>) -> Result<Vec<CommitRecord>> {
        let path = query.path.map(Path::to_path_buf);
        self.log_queries.lock().expect("lock poisoned").push((
            query.since.map(String::from),
            path.clone(),
            query.limit,
        ));

        if self.failing_logs.contains(&path) {
            return Err(git_failure("log"));
        }

        let key = LogKey {
            since: query.since.map(String::from),
            path,
        };
        let mut result = self.logs.get(&key).cloned().unwrap_or_default();
        if let Some(limit) = query.limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    fn file_diff(&self, _root: &Path, commit: &str, path: &Path) -> Result<String> {
        Ok(self
            .diffs
            .get(&(commit.to_string(), path.to_path_buf()))
            .cloned()
            .unwrap_or_default())
    }
}

pub struct MockCommandRunner {
    output: Option<String>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockCommandRunner {
    #[must_use]
    pub fn with_output(output: &str) -> Self {
        Self {
            output: Some(output.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            output: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, _dir: &Path, program: &str, args: &[String]) -> Result<String> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((program.to_string(), args.to_vec()));

        self.output
            .clone()
            .ok_or_else(|| OperationError::CommandSpawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            })
    }
}

#[derive(Default)]
pub struct MockChangesetWriter {
    written: Mutex<Vec<(PathBuf, Changeset)>>,
    failing_packages: HashSet<String>,
}

impl MockChangesetWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_for(mut self, package: &str) -> Self {
        self.failing_packages.insert(package.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<(PathBuf, Changeset)> {
        self.written.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn written_bumps(&self) -> Vec<(String, BumpType)> {
        self.written()
            .into_iter()
            .map(|(_, c)| (c.package, c.bump))
            .collect()
    }
}

impl ChangesetWriter for MockChangesetWriter {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<PathBuf> {
        if self.failing_packages.contains(&changeset.package) {
            return Err(OperationError::ChangesetFileWrite {
                path: changeset_dir.join(&changeset.package),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }

        let path = changeset_dir.join(format!("{}.md", changeset.package.replace('/', "-")));
        self.written
            .lock()
            .expect("lock poisoned")
            .push((path.clone(), changeset.clone()));
        Ok(path)
    }
}
