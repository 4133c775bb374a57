//! Versioning and release tasks.

use super::TaskContext;
use crate::error::{Error, Result};
use crate::project::{git, version};
use crate::shell::Shell;

/// Environment variable holding the release tag.
pub const TAG_ENV: &str = "tag";

/// Publishes `tag`: bumps the marketing version and the podspec, then
/// commits, tags and pushes.
///
/// # Arguments
///
/// * `ctx` - Task context
/// * `tag` - Version to release; empty or missing is an error
///
/// # Returns
///
/// * `Err(Error::Release)` - no tag, or uncommitted changes in the project
pub fn release<S: Shell>(ctx: &TaskContext<S>, tag: Option<&str>) -> Result<()> {
    let tag = tag
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Release {
            reason: "Tag not defined".to_string(),
        })?;

    if !git::is_tree_clean(ctx.project_dir()) {
        return Err(Error::Release {
            reason: "Please commit all your changes before running a release".to_string(),
        });
    }

    let runner = ctx.runner();
    ctx.output().info(&format!("Setting version to {tag}"));
    version::set_version(runner, tag)?;

    let podspec = ctx.project_dir().join(ctx.config().podspec_path());
    if podspec.is_file() {
        ctx.output().info("Updating podspec");
        version::update_podspec_version(runner, &podspec, tag)?;
    } else {
        log::debug!("no podspec at {}, skipping", podspec.display());
    }

    git::commit_tag_and_push(runner, tag)?;
    ctx.output().success(&format!("✓ Released {tag}"));
    Ok(())
}

pub fn set_version<S: Shell>(ctx: &TaskContext<S>, value: &str) -> Result<()> {
    version::set_version(ctx.runner(), value)
}

pub fn set_build<S: Shell>(ctx: &TaskContext<S>, value: &str) -> Result<()> {
    version::set_build(ctx.runner(), value)
}

pub fn increment_build<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    version::increment_build_number(ctx.runner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::tests::context;
    use crate::project::tools;
    use crate::shell::RecordingShell;
    use std::process::Command;

    #[test]
    fn missing_tag_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        for tag in [None, Some(""), Some("  ")] {
            let err = release(&ctx, tag).unwrap_err();
            assert_eq!(err.to_string(), "Tag not defined");
        }
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn releases_from_clean_repository() {
        if tools::locate("git").is_none() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let init = Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(init.success());
        std::fs::write(
            dir.path().join("Nappa.podspec"),
            "Pod::Spec.new do |s|\n  s.version = '1.0.0'\nend\n",
        )
        .unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        release(&ctx, Some("1.1.0")).unwrap();

        assert_eq!(
            shell.calls(),
            vec![
                "agvtool new-marketing-version 1.1.0",
                "git commit -a -m 'Update project to version 1.1.0'",
                "git tag 1.1.0",
                "git push",
                "git push origin 1.1.0",
            ]
        );
        let podspec = std::fs::read_to_string(dir.path().join("Nappa.podspec")).unwrap();
        assert!(podspec.contains("s.version = '1.1.0'"));
        let progress = ctx.output().captured();
        assert!(progress.contains(&"➜ Setting version to 1.1.0".to_string()));
        assert!(progress.contains(&"➜ Updating podspec".to_string()));
    }

    #[test]
    fn version_call_throughs() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        set_version(&ctx, "2.0").unwrap();
        set_build(&ctx, "42").unwrap();
        increment_build(&ctx).unwrap();

        assert_eq!(
            shell.calls(),
            vec![
                "agvtool new-marketing-version 2.0",
                "agvtool new-version -all 42",
                "agvtool next-version -all",
            ]
        );
    }
}
