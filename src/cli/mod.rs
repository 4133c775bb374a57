//! Command line interface for xcforge.
//!
//! Parses arguments, loads the project configuration and dispatches to the
//! orchestration tasks in [`commands`].

mod args;
pub mod commands;

pub use args::{Args, Configuration, RuntimeConfig, Task};

use crate::cli::commands::TaskContext;
use crate::project::tools::HAS_XCPRETTY;
use crate::project::{FallbackCredentials, Platform, ProjectConfig};
use crate::shell::{CommandRunner, Shell};
use anyhow::Context;

/// Main CLI entry point
pub fn run() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);
    execute(&args, &runtime)
}

/// Runs the task selected by `args`.
///
/// Commands are executed from the project directory, so the working
/// directory of the process changes to it first.
pub fn execute(args: &Args, runtime: &RuntimeConfig) -> anyhow::Result<()> {
    let project_dir = std::fs::canonicalize(&args.project_dir).with_context(|| {
        format!(
            "project directory {} does not exist",
            args.project_dir.display()
        )
    })?;
    std::env::set_current_dir(&project_dir)
        .with_context(|| format!("failed to enter {}", project_dir.display()))?;

    let config = ProjectConfig::load(&project_dir, args.config.as_deref())?;
    let summary = format!(
        "Project {} in {} ({})",
        config.name,
        project_dir.display(),
        config.source().display()
    );
    runtime.output().verbose(&summary);

    let runner = CommandRunner::new(runtime.output().clone()).dry_run(runtime.dry_run());

    let mut pretty = runtime.pretty();
    if pretty && !runner.is_dry_run() && !*HAS_XCPRETTY {
        runtime
            .output()
            .warn("xcpretty not found, showing raw xcodebuild output");
        pretty = false;
    }

    let ctx = TaskContext::new(project_dir, config, runner, pretty);
    dispatch(&ctx, &args.task).with_context(|| format!("{} failed", args.task.name()))
}

fn dispatch<S: Shell>(ctx: &TaskContext<S>, task: &Task) -> crate::error::Result<()> {
    match task {
        Task::Bootstrap => commands::bootstrap(ctx),
        Task::Update => commands::update(ctx),
        Task::UpdateTools => commands::update_tools(ctx),
        Task::Archive => commands::archive(ctx),
        Task::ExportArchive => commands::export_archive(ctx),
        Task::Testflight => {
            let config = ctx.config();
            let mut credentials =
                FallbackCredentials::from_env(&config.itunes_user, &config.itunes_password);
            commands::testflight(ctx, &mut credentials)
        }
        Task::Clean => commands::clean(ctx),
        Task::RemoveDerivedData => commands::remove_derived_data(ctx),
        Task::BuildFramework => commands::build_framework(ctx),
        Task::ArchiveFramework => commands::archive_framework(ctx),
        Task::PodLint => commands::pod_lint(ctx),
        Task::PodPush => commands::pod_push(ctx),
        Task::Release { tag } => commands::release(ctx, tag.as_deref()),
        Task::SetVersion { version } => commands::set_version(ctx, version),
        Task::SetBuild { build } => commands::set_build(ctx, build),
        Task::IncrementBuild => commands::increment_build(ctx),
        Task::Test => commands::test(ctx),
        Task::TestIos { configuration } => {
            commands::test_platform(ctx, Platform::Ios, configuration.as_str())
        }
        Task::TestMacos { configuration } => {
            commands::test_platform(ctx, Platform::MacOs, configuration.as_str())
        }
        Task::TestTvos { configuration } => {
            commands::test_platform(ctx, Platform::TvOs, configuration.as_str())
        }
        Task::BuildWatchos { configuration } => {
            commands::build_watchos(ctx, configuration.as_str())
        }
        Task::Doctor => commands::doctor(ctx),
    }
}
