mod config;
mod error;
mod manifest;
mod workspace;

pub const DEFAULT_PACKAGES_DIR: &str = "packages";
pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const CONFIG_FILE_NAME: &str = "autochangeset.toml";
pub const MANIFEST_FILE_NAME: &str = "package.json";

pub use config::Config;
pub use error::WorkspaceError;
pub use manifest::read_package;
pub use workspace::{Workspace, discover_packages};

pub type Result<T> = std::result::Result<T, WorkspaceError>;
