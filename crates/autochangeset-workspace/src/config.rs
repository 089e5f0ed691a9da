use std::path::{Path, PathBuf};

use autochangeset_core::AttributionStrategy;
use serde::Deserialize;

use crate::error::WorkspaceError;
use crate::{CONFIG_FILE_NAME, DEFAULT_CHANGESET_DIR, DEFAULT_PACKAGES_DIR};

const DEFAULT_BASE_REF: &str = "HEAD~1";
const DEFAULT_TASK: &str = "build";
const DEFAULT_FALLBACK_COMMIT_LIMIT: usize = 10;

fn default_plan_command() -> Vec<String> {
    ["pnpm", "turbo", "run", "build", "--dry-run=json"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Settings for one generation run.
///
/// Every key of `autochangeset.toml` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub packages_dir: PathBuf,
    pub changeset_dir: PathBuf,
    /// Base revision of the committed diff used to detect changed packages.
    pub base_ref: String,
    /// Orchestrator task whose planned runs mark packages as changed.
    pub task: String,
    pub plan_command: Vec<String>,
    pub attribution: AttributionStrategy,
    /// Number of recent commits used when the repository has no tag.
    pub fallback_commit_limit: usize,
    /// Emit records for changed packages that have no attributed commits.
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages_dir: PathBuf::from(DEFAULT_PACKAGES_DIR),
            changeset_dir: PathBuf::from(DEFAULT_CHANGESET_DIR),
            base_ref: DEFAULT_BASE_REF.to_string(),
            task: DEFAULT_TASK.to_string(),
            plan_command: default_plan_command(),
            attribution: AttributionStrategy::default(),
            fallback_commit_limit: DEFAULT_FALLBACK_COMMIT_LIMIT,
            force: false,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns [`WorkspaceError::ConfigParse`] if `content` is not a valid config.
    pub fn parse(content: &str, path: &Path) -> Result<Self, WorkspaceError> {
        toml::from_str(content).map_err(|source| WorkspaceError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, WorkspaceError> {
        let content = std::fs::read_to_string(path).map_err(|source| WorkspaceError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Loads `autochangeset.toml` from `root`, or the defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, WorkspaceError> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}
