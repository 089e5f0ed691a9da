use std::path::{Path, PathBuf};

use autochangeset_core::{ChangedPackage, CommitRecord, error_chain};
use autochangeset_version::{classify_message, highest_bump};
use tracing::{debug, error, info};

use crate::traits::ChangesetWriter;

/// Classifies every commit and reduces them to the package's bump.
#[must_use]
pub fn resolve_changed_package(name: &str, commits: Vec<CommitRecord>) -> ChangedPackage {
    let bump = highest_bump(commits.iter().map(|commit| {
        let bump = classify_message(&commit.message);
        debug!(package = name, %commit, %bump, "classified commit");
        bump
    }));

    ChangedPackage {
        name: name.to_string(),
        bump,
        commits,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmissionReport {
    pub written: Vec<PathBuf>,
    /// Packages whose record could not be written.
    pub failed: Vec<String>,
}

/// Writes one record per package into `changeset_dir`.
///
/// A failed write is logged and does not stop the remaining packages.
pub fn emit_changesets<W: ChangesetWriter>(
    writer: &W,
    changeset_dir: &Path,
    changed: &[ChangedPackage],
) -> EmissionReport {
    let mut report = EmissionReport::default();

    for package in changed {
        match writer.write_changeset(changeset_dir, &package.to_changeset()) {
            Ok(path) => {
                info!(package = %package.name, bump = %package.bump, path = %path.display(), "wrote changeset");
                report.written.push(path);
            }
            Err(e) => {
                error!(package = %package.name, error = %error_chain(&e), "failed to write changeset");
                report.failed.push(package.name.clone());
            }
        }
    }

    report
}
