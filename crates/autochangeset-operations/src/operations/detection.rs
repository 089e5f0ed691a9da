use autochangeset_core::error_chain;
use autochangeset_workspace::Workspace;
use indexmap::IndexSet;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{CommandRunner, GitProvider};

/// A source of "which packages changed" signals.
pub trait ChangeDetector {
    fn name(&self) -> &'static str;

    /// Names of changed packages in first-seen order. Empty means no signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying tool fails; callers treat that as no signal.
    fn detect(&self, workspace: &Workspace) -> Result<IndexSet<String>>;
}

/// Maps files changed between `base_ref` and `HEAD` to their owning packages.
pub struct GitDiffDetector<'a, G> {
    git: &'a G,
    base_ref: &'a str,
}

impl<'a, G: GitProvider> GitDiffDetector<'a, G> {
    pub fn new(git: &'a G, base_ref: &'a str) -> Self {
        Self { git, base_ref }
    }
}

impl<G: GitProvider> ChangeDetector for GitDiffDetector<'_, G> {
    fn name(&self) -> &'static str {
        "git"
    }

    fn detect(&self, workspace: &Workspace) -> Result<IndexSet<String>> {
        let files = self
            .git
            .changed_files(&workspace.root, self.base_ref, "HEAD")?;

        let mut changed = IndexSet::new();
        for file in &files {
            match workspace.owner_of(file) {
                Some(package) => {
                    changed.insert(package.name.clone());
                }
                None => debug!(file = %file.display(), "file belongs to no package"),
            }
        }

        Ok(changed)
    }
}

#[derive(Debug, Deserialize)]
struct DryRunPlan {
    #[serde(default)]
    tasks: Vec<PlannedTask>,
}

#[derive(Debug, Deserialize)]
struct PlannedTask {
    task: String,
    package: Option<String>,
}

/// Collects the packages a build orchestrator's dry-run would run `task` for.
pub struct PlanDetector<'a, C> {
    runner: &'a C,
    command: &'a [String],
    task: &'a str,
}

impl<'a, C: CommandRunner> PlanDetector<'a, C> {
    pub fn new(runner: &'a C, command: &'a [String], task: &'a str) -> Self {
        Self {
            runner,
            command,
            task,
        }
    }
}

impl<C: CommandRunner> ChangeDetector for PlanDetector<'_, C> {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn detect(&self, workspace: &Workspace) -> Result<IndexSet<String>> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(OperationError::EmptyCommand);
        };

        let output = self.runner.run(&workspace.root, program, args)?;
        let plan: DryRunPlan = serde_json::from_str(&output).map_err(OperationError::PlanParse)?;

        Ok(plan
            .tasks
            .into_iter()
            .filter(|t| t.task == self.task)
            .filter_map(|t| t.package)
            .filter(|p| !p.is_empty())
            .collect())
    }
}

/// Runs `detectors` in order and returns the first non-empty signal.
///
/// A failing detector is logged and skipped.
pub fn first_signal(
    detectors: &[&dyn ChangeDetector],
    workspace: &Workspace,
) -> IndexSet<String> {
    for detector in detectors {
        match detector.detect(workspace) {
            Ok(changed) if !changed.is_empty() => {
                info!(
                    source = detector.name(),
                    packages = ?changed,
                    "detected changed packages"
                );
                return changed;
            }
            Ok(_) => debug!(source = detector.name(), "no changed packages"),
            Err(e) => warn!(
                source = detector.name(),
                error = %error_chain(&e),
                "could not detect changed packages"
            ),
        }
    }

    IndexSet::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockCommandRunner, MockGitProvider, workspace};

    const PLAN: &str = r#"{
        "id": "abc",
        "version": "1",
        "tasks": [
            {"taskId": "@acme/ui#build", "task": "build", "package": "@acme/ui", "hash": "1"},
            {"taskId": "@acme/ui#lint", "task": "lint", "package": "@acme/ui"},
            {"taskId": "@acme/utils#lint", "task": "lint", "package": "@acme/utils"},
            {"taskId": "//#build", "task": "build"},
            {"taskId": "@acme/utils#build", "task": "build", "package": "@acme/utils"},
            {"taskId": "@acme/ui#build", "task": "build", "package": "@acme/ui"}
        ]
    }"#;

    fn ws() -> Workspace {
        workspace(&[("@acme/ui", "ui"), ("@acme/utils", "utils")])
    }

    fn command() -> Vec<String> {
        ["pnpm", "turbo", "run", "build", "--dry-run=json"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn git_maps_files_to_packages() {
        let git = MockGitProvider::new().with_changed_files(&[
            "packages/utils/src/index.ts",
            "README.md",
            "packages/ui/package.json",
            "packages/utils/package.json",
            "packages/gone/index.ts",
        ]);

        let changed = GitDiffDetector::new(&git, "HEAD~1")
            .detect(&ws())
            .expect("should detect");

        let names: Vec<_> = changed.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["@acme/utils", "@acme/ui"]);
    }

    #[test]
    fn git_without_package_files_is_empty() {
        let git = MockGitProvider::new().with_changed_files(&["scripts/release.ts"]);

        let changed = GitDiffDetector::new(&git, "HEAD~1")
            .detect(&ws())
            .expect("should detect");

        assert!(changed.is_empty());
    }

    #[test]
    fn git_failure_is_an_error() {
        let git = MockGitProvider::new();

        assert!(GitDiffDetector::new(&git, "HEAD~1").detect(&ws()).is_err());
    }

    #[test]
    fn plan_collects_packages_for_task() {
        let runner = MockCommandRunner::with_output(PLAN);
        let command = command();

        let changed = PlanDetector::new(&runner, &command, "build")
            .detect(&ws())
            .expect("should detect");

        let names: Vec<_> = changed.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["@acme/ui", "@acme/utils"]);
        assert_eq!(runner.calls()[0].0, "pnpm");
        assert_eq!(runner.calls()[0].1[0], "turbo");
    }

    #[test]
    fn plan_filters_on_task_name() {
        let runner = MockCommandRunner::with_output(PLAN);
        let command = command();

        let changed = PlanDetector::new(&runner, &command, "lint")
            .detect(&ws())
            .expect("should detect");

        assert_eq!(changed.len(), 2);
    }

    #[test]
    fn plan_with_malformed_json_fails() {
        let runner = MockCommandRunner::with_output("turbo: command not found");
        let command = command();

        let result = PlanDetector::new(&runner, &command, "build").detect(&ws());

        assert!(matches!(result, Err(OperationError::PlanParse(_))));
    }

    #[test]
    fn plan_with_empty_command_fails() {
        let runner = MockCommandRunner::with_output(PLAN);

        let result = PlanDetector::new(&runner, &[], "build").detect(&ws());

        assert!(matches!(result, Err(OperationError::EmptyCommand)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn first_signal_prefers_git() {
        let git = MockGitProvider::new().with_changed_files(&["packages/ui/index.ts"]);
        let runner = MockCommandRunner::with_output(PLAN);
        let command = command();
        let git_detector = GitDiffDetector::new(&git, "HEAD~1");
        let plan_detector = PlanDetector::new(&runner, &command, "build");

        let changed = first_signal(&[&git_detector, &plan_detector], &ws());

        assert_eq!(changed.len(), 1);
        assert!(changed.contains("@acme/ui"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn first_signal_falls_back_when_git_is_empty() {
        let git = MockGitProvider::new().with_changed_files(&[]);
        let runner = MockCommandRunner::with_output(PLAN);
        let command = command();
        let git_detector = GitDiffDetector::new(&git, "HEAD~1");
        let plan_detector = PlanDetector::new(&runner, &command, "build");

        let changed = first_signal(&[&git_detector, &plan_detector], &ws());

        assert_eq!(changed.len(), 2);
    }

    #[test]
    fn first_signal_falls_back_when_git_fails() {
        let git = MockGitProvider::new();
        let runner = MockCommandRunner::with_output(PLAN);
        let command = command();
        let git_detector = GitDiffDetector::new(&git, "HEAD~1");
        let plan_detector = PlanDetector::new(&runner, &command, "build");

        let changed = first_signal(&[&git_detector, &plan_detector], &ws());

        assert!(changed.contains("@acme/utils"));
    }

    #[test]
    fn first_signal_is_empty_when_everything_fails() {
        let git = MockGitProvider::new();
        let runner = MockCommandRunner::failing();
        let command = command();
        let git_detector = GitDiffDetector::new(&git, "HEAD~1");
        let plan_detector = PlanDetector::new(&runner, &command, "build");

        let changed = first_signal(&[&git_detector, &plan_detector], &ws());

        assert!(changed.is_empty());
    }
}
