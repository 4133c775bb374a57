//! Orchestration tasks.
//!
//! Each task configures [`XcodeBuild`] builders or issues plain command lines
//! through the shared [`CommandRunner`]. Tasks never retry; the first failure
//! is returned to the caller.

mod dependencies;
mod distribution;
mod maintenance;
mod release;
mod testing;

pub use dependencies::{
    archive_framework, bootstrap, build_framework, pod_lint, pod_push, update, update_tools,
};
pub use distribution::{archive, export_archive, testflight};
pub use maintenance::{clean, doctor, remove_derived_data};
pub use release::{TAG_ENV, increment_build, release, set_build, set_version};
pub use testing::{build_watchos, test, test_platform};

use crate::output::OutputManager;
use crate::project::{PLATFORM_ENV, ProjectConfig};
use crate::shell::{CommandRunner, Shell, SystemShell};
use crate::xcode::XcodeBuild;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// Everything a task needs: the project, its configuration and a runner.
pub struct TaskContext<S: Shell = SystemShell> {
    project_dir: PathBuf,
    config: ProjectConfig,
    runner: CommandRunner<S>,
    pretty: bool,
    platform: OnceCell<String>,
}

impl<S: Shell> TaskContext<S> {
    pub fn new(
        project_dir: PathBuf,
        config: ProjectConfig,
        runner: CommandRunner<S>,
        pretty: bool,
    ) -> Self {
        Self {
            project_dir,
            config,
            runner,
            pretty,
            platform: OnceCell::new(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn runner(&self) -> &CommandRunner<S> {
        &self.runner
    }

    pub fn output(&self) -> &OutputManager {
        self.runner.output()
    }

    /// Dependency platform, resolved once from the configuration and the
    /// `platform` environment variable.
    pub fn platform(&self) -> &str {
        self.platform.get_or_init(|| {
            self.output().info("Initializing environment...");
            self.config
                .clone()
                .with_platform_override(std::env::var(PLATFORM_ENV).ok())
                .platform
        })
    }

    /// Fresh builder without workspace or scheme.
    pub fn xcodebuild(&self) -> XcodeBuild {
        let mut xc = XcodeBuild::new();
        if !self.pretty {
            xc.disable_pretty_output();
        }
        xc
    }

    /// Fresh builder pointed at the project workspace and `scheme`.
    pub fn xcodebuild_for(&self, scheme: &str) -> XcodeBuild {
        let mut xc = self.xcodebuild();
        xc.workspace(&self.config.workspace()).scheme(scheme);
        xc
    }
}
