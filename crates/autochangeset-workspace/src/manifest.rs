use std::path::Path;

use autochangeset_core::PackageInfo;
use semver::Version;
use serde::Deserialize;

use crate::MANIFEST_FILE_NAME;
use crate::error::WorkspaceError;

/// The subset of `package.json` the inventory cares about.
#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
}

/// Reads the package whose manifest lives in `package_dir`.
///
/// `root` is the workspace root used to compute [`PackageInfo::relative_path`].
///
/// # Errors
///
/// Returns [`WorkspaceError`] if the manifest is missing, is not valid JSON, lacks a
/// `name` or `version`, or carries a version that is not semver.
pub fn read_package(root: &Path, package_dir: &Path) -> Result<PackageInfo, WorkspaceError> {
    let path = package_dir.join(MANIFEST_FILE_NAME);

    let content = std::fs::read_to_string(&path).map_err(|source| WorkspaceError::ManifestRead {
        path: path.clone(),
        source,
    })?;

    let manifest: PackageManifest =
        serde_json::from_str(&content).map_err(|source| WorkspaceError::ManifestParse {
            path: path.clone(),
            source,
        })?;

    let name = manifest
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| WorkspaceError::MissingField {
            path: path.clone(),
            field: "name",
        })?;

    let version_str = manifest.version.ok_or_else(|| WorkspaceError::MissingField {
        path: path.clone(),
        field: "version",
    })?;

    let version =
        Version::parse(&version_str).map_err(|source| WorkspaceError::InvalidVersion {
            path: path.clone(),
            version: version_str,
            source,
        })?;

    let relative_path = package_dir
        .strip_prefix(root)
        .map_or_else(|_| package_dir.to_path_buf(), Path::to_path_buf);

    Ok(PackageInfo {
        name,
        version,
        path: package_dir.to_path_buf(),
        relative_path,
    })
}
