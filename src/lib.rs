//! Build orchestration for Apple-platform projects
//!
//! This library drives `xcodebuild`, Carthage and CocoaPods:
//! - [`Destination`] values for `-destination`
//! - [`XcodeBuild`], an accumulating `xcodebuild` command builder
//! - [`CommandRunner`], which prints and executes commands with dry-run support
//!
//! It can be used both as a CLI tool (`xcforge`) and as a library dependency.

pub mod cli;
pub mod error;
pub mod output;
pub mod project;
pub mod shell;
pub mod xcode;

// Re-export commonly used types
pub use error::{Error, Result};
pub use output::OutputManager;
pub use project::{Platform, ProjectConfig};
pub use shell::{CommandRunner, Shell, ShellOutcome, SystemShell};
pub use xcode::{Destination, DestinationSpec, XcodeBuild};
