//! Colored, arrow-prefixed terminal output.
//!
//! All user facing lines (commands about to run, progress, errors) go
//! through [`OutputManager`] so that dry runs and real runs print exactly
//! the same thing.

use std::cell::RefCell;
use std::io::{IsTerminal, Write};
use std::rc::Rc;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prefix printed in front of every line.
pub const ARROW: &str = "➜ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone)]
enum Target {
    Terminal,
    Buffer(Rc<RefCell<Vec<String>>>),
}

/// Output manager for colored terminal output.
///
/// Cheap to clone; clones share the same target, so a buffered manager
/// handed to a runner can be inspected afterwards through the original.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    target: Target,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl OutputManager {
    /// Creates a manager writing to the terminal.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Print messages sent through [`OutputManager::verbose`]
    /// * `quiet` - Suppress informational and success messages (commands and
    ///   errors are always printed)
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            target: Target::Terminal,
        }
    }

    /// Creates a manager that records plain (uncolored) lines in memory.
    pub fn buffered() -> Self {
        Self {
            verbose: true,
            quiet: false,
            target: Target::Buffer(Rc::new(RefCell::new(Vec::new()))),
        }
    }

    /// Lines recorded so far by a buffered manager. Empty for terminal output.
    pub fn captured(&self) -> Vec<String> {
        match &self.target {
            Target::Buffer(lines) => lines.borrow().clone(),
            Target::Terminal => Vec::new(),
        }
    }

    /// A command line that is about to run.
    pub fn command(&self, line: &str) {
        self.emit(Stream::Stdout, Color::Green, true, line);
    }

    /// General progress information.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(Stream::Stdout, Color::Cyan, true, message);
        }
    }

    /// Success message.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(Stream::Stdout, Color::Green, false, message);
        }
    }

    /// Warning message.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            self.emit(Stream::Stdout, Color::Yellow, true, message);
        }
    }

    /// Error message on stdout, next to the output of the command that failed.
    pub fn error(&self, message: &str) {
        self.emit(Stream::Stdout, Color::Red, true, message);
    }

    /// Fatal error message on stderr.
    pub fn fatal(&self, message: &str) {
        self.emit(Stream::Stderr, Color::Red, true, message);
    }

    /// Whether [`OutputManager::verbose`] messages are shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Message only shown in verbose mode.
    pub fn verbose(&self, message: &str) {
        if self.is_verbose() {
            self.emit(Stream::Stdout, Color::White, false, message);
        }
    }

    /// Empty separator line.
    pub fn blank(&self) {
        match &self.target {
            Target::Buffer(lines) => lines.borrow_mut().push(String::new()),
            Target::Terminal => println!(),
        }
    }

    fn emit(&self, stream: Stream, color: Color, intense: bool, message: &str) {
        let line = format!("{ARROW}{message}");
        match &self.target {
            Target::Buffer(lines) => lines.borrow_mut().push(line),
            Target::Terminal => {
                // Terminal write failures (closed pipe) are not worth aborting a build for
                let _ = write_colored(stream, color, intense, &line);
            }
        }
    }
}

fn write_colored(stream: Stream, color: Color, intense: bool, line: &str) -> std::io::Result<()> {
    let mut out = match stream {
        Stream::Stdout => StandardStream::stdout(color_choice(std::io::stdout().is_terminal())),
        Stream::Stderr => StandardStream::stderr(color_choice(std::io::stderr().is_terminal())),
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(intense))?;
    writeln!(out, "{line}")?;
    out.reset()?;
    out.flush()
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_lines_are_arrow_prefixed() {
        let output = OutputManager::buffered();
        output.command("xcodebuild clean");
        output.info("Cleaning...");
        assert_eq!(
            output.captured(),
            vec!["➜ xcodebuild clean".to_string(), "➜ Cleaning...".to_string()]
        );
    }

    #[test]
    fn clones_share_the_buffer() {
        let output = OutputManager::buffered();
        let clone = output.clone();
        clone.error("boom");
        clone.blank();
        assert_eq!(output.captured(), vec!["➜ boom".to_string(), String::new()]);
    }

    #[test]
    fn verbose_lines_follow_the_flags() {
        let output = OutputManager::buffered();
        output.verbose("Project Nappa");
        assert_eq!(output.captured(), vec!["➜ Project Nappa".to_string()]);

        assert!(!OutputManager::new(false, false).is_verbose());
        assert!(!OutputManager::new(true, true).is_verbose());
    }

    #[test]
    fn terminal_manager_captures_nothing() {
        assert!(OutputManager::new(true, false).captured().is_empty());
    }

    #[test]
    fn non_terminal_output_is_not_colored() {
        assert_eq!(color_choice(false), ColorChoice::Never);
        assert_eq!(color_choice(true), ColorChoice::Auto);
    }
}
