use std::path::{Path, PathBuf};

use autochangeset_core::{PackageInfo, error_chain};
use tracing::{debug, warn};

use crate::error::WorkspaceError;
use crate::manifest::read_package;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    /// Packages root relative to `root`.
    pub packages_dir: PathBuf,
    pub packages: Vec<PackageInfo>,
}

impl Workspace {
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn find_by_dir_name(&self, dir_name: &str) -> Option<&PackageInfo> {
        self.packages
            .iter()
            .find(|p| p.dir_name() == Some(dir_name))
    }

    /// Owning package of a repository-relative path such as `packages/ui/src/index.ts`.
    #[must_use]
    pub fn owner_of(&self, file: &Path) -> Option<&PackageInfo> {
        let rest = file.strip_prefix(&self.packages_dir).ok()?;
        let dir_name = rest.components().next()?.as_os_str().to_str()?;
        // A file directly inside the packages root belongs to no package.
        if rest.components().count() < 2 {
            return None;
        }
        self.find_by_dir_name(dir_name)
    }
}

/// Inventories every immediate subdirectory of `root/packages_dir` holding a readable
/// manifest, in directory name order.
///
/// Unreadable directory entries and manifests are skipped with a warning; a missing
/// packages directory yields an empty inventory.
#[must_use]
pub fn discover_packages(root: &Path, packages_dir: &Path) -> Workspace {
    let packages = match list_package_dirs(&root.join(packages_dir)) {
        Ok(dirs) => dirs
            .into_iter()
            .filter_map(|dir| match read_package(root, &dir) {
                Ok(package) => {
                    debug!(name = %package.name, version = %package.version, "found package");
                    Some(package)
                }
                Err(e) => {
                    warn!(path = %dir.display(), error = %error_chain(&e), "skipping package");
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!(error = %error_chain(&e), "could not read packages directory");
            Vec::new()
        }
    };

    Workspace {
        root: root.to_path_buf(),
        packages_dir: packages_dir.to_path_buf(),
        packages,
    }
}

fn list_package_dirs(packages_root: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    let to_error = |source| WorkspaceError::PackagesDirRead {
        path: packages_root.to_path_buf(),
        source,
    };

    let entries = std::fs::read_dir(packages_root).map_err(to_error)?;
    Ok(directories(
        packages_root,
        entries.map(|entry| entry.map(|e| e.path())),
    ))
}

/// Sorted directories among `entries`; entries that cannot be read are skipped.
fn directories(
    packages_root: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Vec<PathBuf> {
    let mut dirs: Vec<_> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = %packages_root.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}
