//! Shell command execution.
//!
//! - [`executor`] - the [`Shell`] seam and the `sh -c` implementation
//! - [`runner`] - [`CommandRunner`], which logs, honours dry-run and turns
//!   failures into [`Error`](crate::Error) values

mod executor;
mod runner;

pub use executor::{Shell, ShellOutcome, SystemShell};
pub use runner::{CommandRunner, DRY_RUN_ENV, env_requests_dry_run};

#[cfg(test)]
pub(crate) use runner::tests::RecordingShell;
