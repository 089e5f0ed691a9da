use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load configuration")]
    Config(#[from] autochangeset_workspace::WorkspaceError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("workspace root '{0}' is not a directory")]
    RootNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;
