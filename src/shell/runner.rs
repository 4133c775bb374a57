//! Command execution with dry-run support and failure reporting.

use super::executor::{Shell, ShellOutcome, SystemShell};
use crate::error::{Error, Result};
use crate::output::OutputManager;
use std::path::Path;

/// Environment variable that forces dry-run mode when set to `true`
/// (compared case-insensitively).
pub const DRY_RUN_ENV: &str = "dryrun";

/// Returns true when the value of [`DRY_RUN_ENV`] requests a dry run.
pub fn env_requests_dry_run(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Executes shell command lines, one at a time, blocking until each exits.
///
/// Every command line is printed before it runs. In dry-run mode nothing is
/// executed at all; the printed line is the only effect.
///
/// Dry-run is active when the runner was built with it enabled *or* when the
/// `dryrun` environment variable equals `true`. The environment is read on
/// every call, so exporting the variable mid-session affects all later
/// commands.
///
/// # Examples
///
/// ```
/// use xcforge::{CommandRunner, OutputManager};
///
/// let runner = CommandRunner::new(OutputManager::buffered()).dry_run(true);
/// runner.run(["pod", "install"]).unwrap();
/// assert_eq!(runner.output().captured(), vec!["➜ pod install".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandRunner<S: Shell = SystemShell> {
    shell: S,
    dry_run: bool,
    output: OutputManager,
}

impl CommandRunner<SystemShell> {
    /// Creates a runner backed by `sh -c`.
    pub fn new(output: OutputManager) -> Self {
        Self::with_shell(SystemShell::default(), output)
    }
}

impl<S: Shell> CommandRunner<S> {
    /// Creates a runner backed by a custom [`Shell`].
    pub fn with_shell(shell: S, output: OutputManager) -> Self {
        Self {
            shell,
            dry_run: false,
            output,
        }
    }

    /// Sets the in-process dry-run switch.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Whether commands are currently only printed, not executed.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || env_requests_dry_run(std::env::var(DRY_RUN_ENV).ok().as_deref())
    }

    /// Output manager used for command and error lines.
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Joins `tokens` with single spaces and runs the result through the shell.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The command exited successfully, or dry-run is active
    /// * `Err(Error::CommandFailed)` - The command exited with a non-zero status
    /// * `Err(Error::Spawn)` - The shell could not be started
    pub fn run<I, T>(&self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let command = join_tokens(tokens);
        self.output.command(&command);
        log::debug!("running: {}", command);

        if self.is_dry_run() {
            log::debug!("dry run, skipping: {}", command);
            return Ok(());
        }

        match self.shell.execute(&command) {
            Ok(outcome) if outcome.success => Ok(()),
            Ok(ShellOutcome { code, stderr, .. }) => {
                let stderr = stderr.trim().to_string();
                self.report_failure(&command, &stderr);
                Err(Error::CommandFailed {
                    command,
                    code,
                    stderr,
                })
            }
            Err(source) => {
                self.report_failure(&command, &source.to_string());
                Err(Error::Spawn { command, source })
            }
        }
    }

    /// Runs `tokens` from inside `path` by prefixing `cd <path> &&`.
    pub fn run_at<P, I, T>(&self, path: P, tokens: I) -> Result<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let path = path.as_ref().display().to_string();
        let prefix = ["cd".to_string(), path, "&&".to_string()];
        let rest = tokens.into_iter().map(|t| t.as_ref().to_string());
        self.run(prefix.into_iter().chain(rest))
    }

    fn report_failure(&self, command: &str, detail: &str) {
        self.output.blank();
        self.output.error("Error running the following command:");
        self.output.command(&format!("\t{command}"));
        if !detail.is_empty() {
            self.output.error(detail);
        }
    }
}

fn join_tokens<I, T>(tokens: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
