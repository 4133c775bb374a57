//! Command line argument parsing.
//!
//! One subcommand per orchestration task; global flags control dry-run,
//! pretty output and where the project lives.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::commands::TAG_ENV;
use crate::output::OutputManager;

/// Build, test, archive and release Apple-platform projects
#[derive(Parser, Debug)]
#[command(
    name = "xcforge",
    version,
    about = "Build, test, archive and release Apple-platform projects",
    long_about = "Drives xcodebuild, Carthage and CocoaPods for an Xcode workspace.

Every command line is printed before it runs. With --dry-run (or dryrun=true
in the environment) commands are only printed.

Usage:
  xcforge bootstrap
  xcforge test-ios debug
  xcforge --dry-run release --tag 1.2.0"
)]
pub struct Args {
    /// Print commands without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Do not pipe xcodebuild output through xcpretty
    #[arg(long, global = true)]
    pub no_pretty: bool,

    /// Project directory; commands run from here
    #[arg(short = 'C', long, global = true, default_value = ".", value_name = "DIR")]
    pub project_dir: PathBuf,

    /// Configuration file, relative to the project directory [default: xcforge.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print commands and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also print configuration and up-to-date checks
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub task: Task,
}

/// Xcode build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Task {
    /// Install all the dependencies
    Bootstrap,
    /// Update all the dependencies
    Update,
    /// Install or upgrade Carthage and CocoaPods
    UpdateTools,
    /// Build an archive with xcodebuild archive
    Archive,
    /// Create the .ipa with xcodebuild -exportArchive
    ExportArchive,
    /// Upload the .ipa to TestFlight
    Testflight,
    /// Clean the Xcode build folder
    Clean,
    /// Remove the Xcode derived data folder
    RemoveDerivedData,
    /// Build all dependencies and the framework (Carthage only)
    BuildFramework,
    /// Archive the framework (Carthage only)
    ArchiveFramework,
    /// Lint the podspec (CocoaPods only)
    PodLint,
    /// Push the pod to the CocoaPods trunk (CocoaPods only)
    PodPush,
    /// Tag and publish a release
    Release {
        /// Version to release; defaults to the `tag` environment variable
        #[arg(long, env = TAG_ENV)]
        tag: Option<String>,
    },
    /// Set the marketing version
    SetVersion { version: String },
    /// Set the build number
    SetBuild { build: String },
    /// Increment the build number
    IncrementBuild,
    /// Run the tests on the default iOS simulator
    Test,
    /// Run the tests on every configured iOS simulator
    TestIos {
        #[arg(value_enum, default_value = "debug")]
        configuration: Configuration,
    },
    /// Run the tests on the Mac
    TestMacos {
        #[arg(value_enum, default_value = "debug")]
        configuration: Configuration,
    },
    /// Run the tests on every configured tvOS simulator
    TestTvos {
        #[arg(value_enum, default_value = "debug")]
        configuration: Configuration,
    },
    /// Build for every configured watchOS simulator
    BuildWatchos {
        #[arg(value_enum, default_value = "debug")]
        configuration: Configuration,
    },
    /// Report which external tools are installed
    Doctor,
}

impl Task {
    /// Subcommand name, for error context.
    pub fn name(&self) -> &'static str {
        match self {
            Task::Bootstrap => "bootstrap",
            Task::Update => "update",
            Task::UpdateTools => "update-tools",
            Task::Archive => "archive",
            Task::ExportArchive => "export-archive",
            Task::Testflight => "testflight",
            Task::Clean => "clean",
            Task::RemoveDerivedData => "remove-derived-data",
            Task::BuildFramework => "build-framework",
            Task::ArchiveFramework => "archive-framework",
            Task::PodLint => "pod-lint",
            Task::PodPush => "pod-push",
            Task::Release { .. } => "release",
            Task::SetVersion { .. } => "set-version",
            Task::SetBuild { .. } => "set-build",
            Task::IncrementBuild => "increment-build",
            Task::Test => "test",
            Task::TestIos { .. } => "test-ios",
            Task::TestMacos { .. } => "test-macos",
            Task::TestTvos { .. } => "test-tvos",
            Task::BuildWatchos { .. } => "build-watchos",
            Task::Doctor => "doctor",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: OutputManager,
    dry_run: bool,
    pretty: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: OutputManager::new(args.verbose, args.quiet),
            dry_run: args.dry_run,
            pretty: !args.no_pretty,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["xcforge", "clean", "--dry-run", "--no-pretty"]).unwrap();
        assert!(args.dry_run);
        assert!(args.no_pretty);
        assert!(matches!(args.task, Task::Clean));
        assert_eq!(args.config, None);
    }

    #[test]
    fn configuration_defaults_to_debug() {
        let args = Args::try_parse_from(["xcforge", "test-tvos"]).unwrap();
        match args.task {
            Task::TestTvos { configuration } => assert_eq!(configuration.as_str(), "Debug"),
            other => panic!("unexpected task {other:?}"),
        }
    }

    #[test]
    fn release_configuration_parses() {
        let args = Args::try_parse_from(["xcforge", "build-watchos", "release"]).unwrap();
        assert!(matches!(
            args.task,
            Task::BuildWatchos {
                configuration: Configuration::Release
            }
        ));
    }

    #[test]
    fn release_tag_flag() {
        let args = Args::try_parse_from(["xcforge", "release", "--tag", "2.0.0"]).unwrap();
        match args.task {
            Task::Release { tag } => assert_eq!(tag.as_deref(), Some("2.0.0")),
            other => panic!("unexpected task {other:?}"),
        }
    }

    #[test]
    fn runtime_config_from_args() {
        let args = Args::try_parse_from(["xcforge", "--dry-run", "doctor"]).unwrap();
        let runtime = RuntimeConfig::from(&args);
        assert!(runtime.dry_run());
        assert!(runtime.pretty());
    }

    #[test]
    fn task_names_match_subcommands() {
        let args = Args::try_parse_from(["xcforge", "remove-derived-data"]).unwrap();
        assert_eq!(args.task.name(), "remove-derived-data");
        let args = Args::try_parse_from(["xcforge", "set-build", "7"]).unwrap();
        assert_eq!(args.task.name(), "set-build");
    }

    #[test]
    fn verbose_flag_reaches_output() {
        let args = Args::try_parse_from(["xcforge", "archive", "-v"]).unwrap();
        assert!(RuntimeConfig::from(&args).output().is_verbose());

        let args = Args::try_parse_from(["xcforge", "archive"]).unwrap();
        assert!(!RuntimeConfig::from(&args).output().is_verbose());

        assert!(Args::try_parse_from(["xcforge", "-q", "-v", "archive"]).is_err());
    }

    #[test]
    fn unknown_task_is_rejected() {
        assert!(Args::try_parse_from(["xcforge", "deploy"]).is_err());
    }
}
