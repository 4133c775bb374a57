//! Process execution through a subordinate shell.

use std::io::Read;
use std::process::{Command, Stdio};

/// What the shell reported after running a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutcome {
    /// Whether the command exited with status zero
    pub success: bool,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Everything the command wrote to standard error
    pub stderr: String,
}

impl ShellOutcome {
    /// Successful outcome with no error output.
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
            stderr: String::new(),
        }
    }

    /// Failed outcome with the given exit code and error output.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
        }
    }
}

/// Something that can execute a full shell command line.
///
/// [`SystemShell`] is the production implementation. The seam exists so that
/// [`CommandRunner`](super::CommandRunner) can be exercised without spawning
/// processes.
pub trait Shell {
    /// Runs `command_line` to completion, blocking the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(ShellOutcome)` - The shell started; the outcome says whether the
    ///   command itself succeeded
    /// * `Err` - The shell could not be started at all. Failures after the
    ///   shell started are reported as an unsuccessful outcome
    fn execute(&self, command_line: &str) -> std::io::Result<ShellOutcome>;
}

impl<S: Shell + ?Sized> Shell for &S {
    fn execute(&self, command_line: &str) -> std::io::Result<ShellOutcome> {
        (**self).execute(command_line)
    }
}

/// Runs command lines with `sh -c`.
///
/// Standard output is inherited so build logs stream live; standard error is
/// captured into memory for error reporting.
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
}

impl Default for SystemShell {
    fn default() -> Self {
        Self {
            program: "sh".to_string(),
        }
    }
}

impl SystemShell {
    /// Uses a specific shell executable instead of `sh`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Shell for SystemShell {
    fn execute(&self, command_line: &str) -> std::io::Result<ShellOutcome> {
        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain before waiting so a chatty tool cannot fill the pipe and stall
        let stderr = match child.stderr.take().map(drain).transpose() {
            Ok(stderr) => stderr.unwrap_or_default(),
            Err(e) => {
                // Nobody reads the pipe any more; stop the child instead of leaking it
                log::warn!("lost stderr of `{}`: {}", command_line, e);
                if let Err(kill) = child.kill() {
                    log::debug!("failed to kill `{}`: {}", command_line, kill);
                }
                let code = child.wait().ok().and_then(|status| status.code());
                return Ok(ShellOutcome {
                    success: false,
                    code,
                    stderr: format!("failed to read standard error: {e}"),
                });
            }
        };

        match child.wait() {
            Ok(status) => {
                log::debug!("`{}` finished with {}", command_line, status);
                Ok(ShellOutcome {
                    success: status.success(),
                    code: status.code(),
                    stderr,
                })
            }
            Err(e) => Ok(ShellOutcome {
                success: false,
                code: None,
                stderr: format!("failed to wait for the command: {e}"),
            }),
        }
    }
}

/// Reads a pipe to the end, replacing invalid UTF-8.
fn drain(mut pipe: impl Read) -> std::io::Result<String> {
    let mut raw = Vec::new();
    pipe.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}
