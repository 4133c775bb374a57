//! Git call-throughs used by releases.

use crate::error::Result;
use crate::shell::{CommandRunner, Shell};
use std::path::Path;
use std::process::{Command, Stdio};

/// Whether the working tree at `repo` has no unstaged changes.
///
/// This is a read-only query, so it runs even in dry-run mode. A missing
/// `git` or a directory that is not a repository counts as not clean.
pub fn is_tree_clean(repo: &Path) -> bool {
    match Command::new("git")
        .args(["diff", "--quiet"])
        .current_dir(repo)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            log::warn!("failed to run git diff in {}: {}", repo.display(), e);
            false
        }
    }
}

/// Commits all tracked changes, tags `tag`, and pushes both.
pub fn commit_tag_and_push<S: Shell>(runner: &CommandRunner<S>, tag: &str) -> Result<()> {
    runner.run([format!(
        "git commit -a -m 'Update project to version {tag}'"
    )])?;
    runner.run(["git tag", tag])?;
    runner.run(["git push"])?;
    runner.run(["git push origin", tag])
}
