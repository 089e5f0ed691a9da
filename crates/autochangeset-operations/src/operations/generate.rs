use std::path::PathBuf;

use autochangeset_core::{AttributionStrategy, ChangedPackage, error_chain};
use autochangeset_workspace::{Config, Workspace, discover_packages};
use tracing::{debug, info, warn};

use super::attribution::{CommitAttributor, ManifestAttributor, TagAttributor};
use super::detection::{ChangeDetector, GitDiffDetector, PlanDetector, first_signal};
use super::emission::{EmissionReport, emit_changesets, resolve_changed_package};
use crate::traits::{ChangesetWriter, CommandRunner, GitProvider};

pub struct GenerateInput {
    pub root: PathBuf,
    pub config: Config,
    /// Compute the records without writing them.
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct GenerateOutput {
    pub packages_found: usize,
    pub detected: Vec<String>,
    pub changed: Vec<ChangedPackage>,
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
}

pub struct GenerateOperation<G, C, W> {
    git: G,
    runner: C,
    writer: W,
}

impl<G, C, W> GenerateOperation<G, C, W>
where
    G: GitProvider,
    C: CommandRunner,
    W: ChangesetWriter,
{
    pub fn new(git: G, runner: C, writer: W) -> Self {
        Self {
            git,
            runner,
            writer,
        }
    }

    /// Runs inventory, change detection, attribution and emission in order.
    ///
    /// Failures of external tools and of individual writes are logged and never abort
    /// the run; an early exit yields an output with nothing changed.
    #[must_use]
    pub fn execute(&self, input: &GenerateInput) -> GenerateOutput {
        let config = &input.config;
        let workspace = discover_packages(&input.root, &config.packages_dir);

        let mut output = GenerateOutput {
            packages_found: workspace.packages.len(),
            ..GenerateOutput::default()
        };

        if workspace.packages.is_empty() {
            info!(packages_dir = %config.packages_dir.display(), "no packages found");
            return output;
        }
        info!(count = output.packages_found, "found packages");

        output.detected = self.detect(&workspace, config);
        if output.detected.is_empty() {
            info!("no changed packages detected");
            return output;
        }

        output.changed = self.attribute(&workspace, config, &output.detected);
        if output.changed.is_empty() {
            info!("no changed package has commits to release");
            return output;
        }

        if input.dry_run {
            info!(count = output.changed.len(), "dry run, not writing changesets");
            return output;
        }

        let changeset_dir = workspace.root.join(&config.changeset_dir);
        let EmissionReport { written, failed } =
            emit_changesets(&self.writer, &changeset_dir, &output.changed);
        output.written = written;
        output.failed = failed;

        output
    }

    fn detect(&self, workspace: &Workspace, config: &Config) -> Vec<String> {
        let git = GitDiffDetector::new(&self.git, &config.base_ref);
        let plan = PlanDetector::new(&self.runner, &config.plan_command, &config.task);
        let detectors: [&dyn ChangeDetector; 2] = [&git, &plan];

        first_signal(&detectors, workspace).into_iter().collect()
    }

    fn attribute(
        &self,
        workspace: &Workspace,
        config: &Config,
        detected: &[String],
    ) -> Vec<ChangedPackage> {
        let attributor: Box<dyn CommitAttributor + '_> = match config.attribution {
            AttributionStrategy::Manifest => {
                Box::new(ManifestAttributor::new(&self.git, &workspace.root))
            }
            AttributionStrategy::Tag => Box::new(TagAttributor::new(
                &self.git,
                &workspace.root,
                config.fallback_commit_limit,
            )),
        };
        debug!(strategy = attributor.name(), "attributing commits");

        for name in detected {
            if workspace.find_by_name(name).is_none() {
                debug!(package = %name, "detected package is not in the inventory");
            }
        }

        let mut changed = Vec::new();
        for package in &workspace.packages {
            if !detected.contains(&package.name) {
                continue;
            }
            let name = &package.name;

            let commits = attributor.commits_for(package).unwrap_or_else(|e| {
                warn!(package = %name, error = %error_chain(&e), "could not read package history");
                Vec::new()
            });

            if commits.is_empty() && !config.force {
                info!(package = %name, "no commits since last release, skipping");
                continue;
            }

            changed.push(resolve_changed_package(name, commits));
        }

        changed
    }
}
