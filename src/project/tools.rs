//! External tool detection.
//!
//! Lookups go through `which`, so only `PATH` matters; nothing is executed.

use crate::error::{Error, Result};
use crate::xcode::XCPRETTY;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Tools the tasks may invoke, in the order `doctor` reports them.
pub const KNOWN_TOOLS: &[&str] = &[
    "xcodebuild",
    "xcpretty",
    "carthage",
    "pod",
    "agvtool",
    "git",
    "brew",
    "gem",
];

/// Whether `xcpretty` is installed.
///
/// Cached so the PATH walk happens at most once per process.
pub static HAS_XCPRETTY: LazyLock<bool> = LazyLock::new(|| match which::which(XCPRETTY) {
    Ok(path) => {
        log::debug!("Found xcpretty at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!("xcpretty not found in PATH: {}", e);
        false
    }
});

/// Availability of one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Location of `tool` on PATH, if any.
pub fn locate(tool: &str) -> Option<PathBuf> {
    which::which(tool).ok()
}

/// Like [`locate`], but a missing tool is an error.
pub fn require(tool: &str) -> Result<PathBuf> {
    locate(tool).ok_or_else(|| Error::MissingTool {
        tool: tool.to_string(),
    })
}

/// Checks every tool in `tools`.
pub fn survey(tools: &[&str]) -> Vec<ToolStatus> {
    tools
        .iter()
        .map(|name| ToolStatus {
            name: (*name).to_string(),
            path: locate(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_is_missing() {
        let tool = "xcforge-surely-not-installed";
        assert_eq!(locate(tool), None);
        let err = require(tool).unwrap_err();
        assert!(matches!(err, Error::MissingTool { tool: ref t } if t == tool));
    }

    #[test]
    fn survey_keeps_order() {
        let statuses = survey(&["xcforge-missing-a", "xcforge-missing-b"]);
        let names: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["xcforge-missing-a", "xcforge-missing-b"]);
        assert!(statuses.iter().all(|s| !s.is_available()));
    }
}
