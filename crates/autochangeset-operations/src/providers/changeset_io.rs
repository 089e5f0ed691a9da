use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use autochangeset_core::Changeset;
use autochangeset_parse::{changeset_filename, render_changeset};
use tracing::{debug, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangesetWriter;

const MAX_FILENAME_ATTEMPTS: usize = 100;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct FileSystemChangesetWriter {
    clock: fn() -> i64,
}

impl FileSystemChangesetWriter {
    #[must_use]
    pub fn new() -> Self {
        Self { clock: now_millis }
    }

    /// Uses `clock` instead of the wall clock for the timestamp in file names.
    #[must_use]
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self { clock }
    }
}

impl Default for FileSystemChangesetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn candidate_name(base: &str, attempt: usize) -> String {
    if attempt == 0 {
        return base.to_string();
    }
    let stem = base.strip_suffix(".md").unwrap_or(base);
    format!("{stem}-{attempt}.md")
}

/// Writes `content` to the freshly created `path`, removing the file if the write fails.
fn write_record(file: &mut impl Write, path: &Path, content: &str) -> Result<()> {
    let Err(source) = file.write_all(content.as_bytes()) else {
        return Ok(());
    };
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "could not remove partial changeset");
    }
    Err(OperationError::ChangesetFileWrite {
        path: path.to_path_buf(),
        source,
    })
}

impl ChangesetWriter for FileSystemChangesetWriter {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<PathBuf> {
        fs::create_dir_all(changeset_dir).map_err(|source| OperationError::ChangesetDirCreate {
            path: changeset_dir.to_path_buf(),
            source,
        })?;

        let content = render_changeset(changeset);
        let base = changeset_filename(&changeset.package, (self.clock)());

        for attempt in 0..MAX_FILENAME_ATTEMPTS {
            let path = changeset_dir.join(candidate_name(&base, attempt));

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "changeset filename taken");
                    continue;
                }
                Err(source) => return Err(OperationError::ChangesetFileWrite { path, source }),
            };

            write_record(&mut file, &path, &content)?;
            return Ok(path);
        }

        Err(OperationError::FilenameExhausted {
            package: changeset.package.clone(),
            dir: changeset_dir.to_path_buf(),
        })
    }
}
