use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] autochangeset_git::GitError),

    #[error("plan command is empty")]
    EmptyCommand,

    #[error("failed to run '{program}'")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("failed to parse dry-run plan")]
    PlanParse(#[source] serde_json::Error),

    #[error("failed to create changeset directory '{path}'")]
    ChangesetDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changeset file '{path}'")]
    ChangesetFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free changeset filename for '{package}' in '{dir}'")]
    FilenameExhausted { package: String, dir: PathBuf },
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use autochangeset_core::error_chain;

    use super::*;

    #[test]
    fn git_error_is_transparent() {
        let err: OperationError = autochangeset_git::GitError::RefNotFound {
            refspec: "HEAD~1".to_string(),
        }
        .into();

        assert!(err.to_string().contains("HEAD~1"));
    }

    #[test]
    fn command_failure_names_program() {
        let err = OperationError::CommandFailed {
            program: "pnpm".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "turbo not found".to_string(),
        };

        let msg = err.to_string();

        assert!(msg.contains("pnpm"));
        assert!(msg.contains("turbo not found"));
    }

    #[test]
    fn write_error_has_source_chain() {
        let err = OperationError::ChangesetFileWrite {
            path: PathBuf::from(".changeset/auto-x-1.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };

        assert!(error_chain(&err).ends_with("read-only"));
    }
}
