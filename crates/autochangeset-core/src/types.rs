use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use semver::Version;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How commits are attributed to a changed package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AttributionStrategy {
    /// Commits touching the package since its manifest's last version change.
    #[default]
    Manifest,
    /// Commits since the most recent tag, shared by every changed package.
    Tag,
}

impl fmt::Display for AttributionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => f.write_str("manifest"),
            Self::Tag => f.write_str("tag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
    pub path: PathBuf,
    pub relative_path: PathBuf,
}

impl PackageInfo {
    /// Name of the directory holding the package, e.g. `foo` for `packages/foo`.
    #[must_use]
    pub fn dir_name(&self) -> Option<&str> {
        self.relative_path.file_name().and_then(|name| name.to_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
}

impl CommitRecord {
    #[must_use]
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Parses a `<hash> <subject>` line as printed by `git log --oneline`.
    ///
    /// Returns `None` for blank lines and lines whose first token is not a hex hash.
    #[must_use]
    pub fn from_oneline(line: &str) -> Option<Self> {
        let line = line.trim_end();
        let (hash, message) = line.split_once(' ')?;
        if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self::new(hash, message))
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim()
    }

    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.short_hash(), self.subject())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPackage {
    pub name: String,
    pub bump: BumpType,
    pub commits: Vec<CommitRecord>,
}

impl ChangedPackage {
    #[must_use]
    pub fn to_changeset(&self) -> Changeset {
        let summary = self
            .commits
            .iter()
            .map(|commit| format!("- {}", commit.subject()))
            .collect::<Vec<_>>()
            .join("\n");

        Changeset {
            package: self.name.clone(),
            bump: self.bump,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub package: String,
    pub bump: BumpType,
    pub summary: String,
}
