use std::cell::OnceCell;
use std::path::Path;

use autochangeset_core::{CommitRecord, PackageInfo, error_chain};
use autochangeset_git::LogQuery;
use autochangeset_workspace::MANIFEST_FILE_NAME;
use tracing::{debug, warn};

use crate::Result;
use crate::traits::GitProvider;

/// Collects the commits that belong in a package's next changeset.
pub trait CommitAttributor {
    fn name(&self) -> &'static str;

    /// Commits attributed to `package`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be queried.
    fn commits_for(&self, package: &PackageInfo) -> Result<Vec<CommitRecord>>;
}

/// True when `diff` replaces a `"version"` line, i.e. removes one and adds one.
///
/// A diff that only adds the key creates the manifest and is not a release.
#[must_use]
pub fn touches_version_field(diff: &str) -> bool {
    let mut removed = false;
    let mut added = false;

    for line in diff
        .lines()
        .filter(|line| !line.starts_with("+++") && !line.starts_with("---"))
        .filter(|line| line.contains("\"version\""))
    {
        removed |= line.starts_with('-');
        added |= line.starts_with('+');
    }

    removed && added
}

/// Attributes commits made since the package manifest's version last changed.
pub struct ManifestAttributor<'a, G> {
    git: &'a G,
    root: &'a Path,
}

impl<'a, G: GitProvider> ManifestAttributor<'a, G> {
    pub fn new(git: &'a G, root: &'a Path) -> Self {
        Self { git, root }
    }

    /// Newest commit of `history` that edited the version line of `manifest`.
    fn release_point<'h>(
        &self,
        history: &'h [CommitRecord],
        manifest: &Path,
    ) -> Result<Option<&'h CommitRecord>> {
        for commit in history {
            let diff = self.git.file_diff(self.root, &commit.hash, manifest)?;
            if touches_version_field(&diff) {
                return Ok(Some(commit));
            }
        }
        Ok(None)
    }
}

impl<G: GitProvider> CommitAttributor for ManifestAttributor<'_, G> {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn commits_for(&self, package: &PackageInfo) -> Result<Vec<CommitRecord>> {
        let manifest = package.relative_path.join(MANIFEST_FILE_NAME);
        let history = self
            .git
            .log(self.root, LogQuery::default().path(&manifest))?;

        let mut query = LogQuery::default().path(&package.relative_path);
        match self.release_point(&history, &manifest)? {
            Some(release) => {
                debug!(package = %package.name, release = %release, "found release point");
                query = query.since(&release.hash);
            }
            None => debug!(package = %package.name, "no release point, using package history"),
        }
        self.git.log(self.root, query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    SinceLatestTag,
    Recent(usize),
}

/// Attributes the commits since the latest tag to every package alike.
///
/// Without any tag the most recent `fallback_limit` commits are used. The window is
/// resolved once and shared by every package of the run.
pub struct TagAttributor<'a, G> {
    git: &'a G,
    root: &'a Path,
    windows: [Window; 2],
    resolved: OnceCell<Vec<CommitRecord>>,
}

impl<'a, G: GitProvider> TagAttributor<'a, G> {
    pub fn new(git: &'a G, root: &'a Path, fallback_limit: usize) -> Self {
        Self {
            git,
            root,
            windows: [Window::SinceLatestTag, Window::Recent(fallback_limit)],
            resolved: OnceCell::new(),
        }
    }

    /// `None` when the window does not apply to this repository.
    fn query(&self, window: Window) -> Result<Option<Vec<CommitRecord>>> {
        match window {
            Window::SinceLatestTag => {
                let Some(tag) = self.git.latest_tag(self.root)? else {
                    debug!("repository has no tags");
                    return Ok(None);
                };
                debug!(%tag, "collecting commits since tag");
                let commits = self.git.log(self.root, LogQuery::default().since(&tag))?;
                Ok(Some(commits))
            }
            Window::Recent(limit) => {
                debug!(limit, "collecting recent commits");
                let commits = self.git.log(self.root, LogQuery::default().limit(limit))?;
                Ok(Some(commits))
            }
        }
    }

    fn resolve(&self) -> Vec<CommitRecord> {
        for &window in &self.windows {
            match self.query(window) {
                Ok(Some(commits)) => return commits,
                Ok(None) => {}
                Err(e) => warn!(?window, error = %error_chain(&e), "could not read history"),
            }
        }
        Vec::new()
    }
}

impl<G: GitProvider> CommitAttributor for TagAttributor<'_, G> {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn commits_for(&self, _package: &PackageInfo) -> Result<Vec<CommitRecord>> {
        Ok(self.resolved.get_or_init(|| self.resolve()).clone())
    }
}
