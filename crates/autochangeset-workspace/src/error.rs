use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to read packages directory '{path}'")]
    PackagesDirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest at '{path}' missing required field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("invalid version '{version}' in manifest at '{path}'")]
    InvalidVersion {
        path: PathBuf,
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
