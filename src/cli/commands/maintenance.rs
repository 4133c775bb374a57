//! Cleanup and environment checks.

use super::TaskContext;
use crate::error::Result;
use crate::project::tools::{self, KNOWN_TOOLS};
use crate::shell::Shell;
use crate::xcode::XCODEBUILD;

const DERIVED_DATA: &str = "~/Library/Developer/Xcode/DerivedData";
const XCODE_CACHES: &str = "~/Library/Caches/com.apple.dt.Xcode";

/// Cleans every target of the project.
pub fn clean<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    ctx.output().info("Cleaning...");
    ctx.xcodebuild().clean(ctx.runner())
}

/// Removes Xcode's derived data and caches.
pub fn remove_derived_data<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    ctx.output().info("Removing derived data...");
    ctx.runner().run(["rm -rf", DERIVED_DATA, XCODE_CACHES])
}

/// Reports which external tools are on `PATH`.
///
/// Only a missing `xcodebuild` is an error; every other tool is needed by
/// some tasks only.
pub fn doctor<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let output = ctx.output();
    for status in tools::survey(KNOWN_TOOLS) {
        let name = &status.name;
        match &status.path {
            Some(path) => output.success(&format!("{name} ({})", path.display())),
            None => output.warn(&format!("{name} not found")),
        }
    }
    tools::require(XCODEBUILD).map(|_| ())
}
