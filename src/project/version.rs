//! Marketing version and build number updates.

use crate::error::{Error, Result};
use crate::shell::{CommandRunner, Shell};
use regex::{Captures, Regex};
use std::path::Path;

/// `agvtool new-marketing-version <version>`
pub fn set_version<S: Shell>(runner: &CommandRunner<S>, version: &str) -> Result<()> {
    runner.run(["agvtool new-marketing-version", version])
}

/// `agvtool new-version -all <build>`
pub fn set_build<S: Shell>(runner: &CommandRunner<S>, build: &str) -> Result<()> {
    runner.run(["agvtool new-version -all", build])
}

/// `agvtool next-version -all`
pub fn increment_build_number<S: Shell>(runner: &CommandRunner<S>) -> Result<()> {
    runner.run(["agvtool next-version -all"])
}

/// Replaces every `version = '...'` assignment in podspec source.
///
/// Only whole-word `version` keys match, so `swift_version` is kept. The
/// spacing around `=` and the quote style are preserved, which keeps the
/// aligned `pod lib create` layout intact.
///
/// # Returns
///
/// * `Err(Error::Release)` - the podspec has no version assignment
pub fn rewrite_podspec_version(podspec: &str, version: &str) -> Result<String> {
    let re = Regex::new(r#"(\bversion\s*=\s*)(['"])[^'"]*['"]"#)?;
    if !re.is_match(podspec) {
        return Err(Error::Release {
            reason: "No version assignment found in the podspec".to_string(),
        });
    }
    Ok(re
        .replace_all(podspec, |caps: &Captures<'_>| {
            format!("{}{}{}{}", &caps[1], &caps[2], version, &caps[2])
        })
        .into_owned())
}

/// Rewrites the version in the podspec at `path`.
///
/// In dry-run mode the file is left untouched.
pub fn update_podspec_version<S: Shell>(
    runner: &CommandRunner<S>,
    path: &Path,
    version: &str,
) -> Result<()> {
    if runner.is_dry_run() {
        log::debug!("dry run, not rewriting {}", path.display());
        return Ok(());
    }
    let input = std::fs::read_to_string(path)?;
    let output = rewrite_podspec_version(&input, version)?;
    std::fs::write(path, output)?;
    log::info!("✓ {} now at version {}", path.display(), version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputManager;
    use crate::shell::RecordingShell;

    const PODSPEC: &str = concat!(
        "Pod::Spec.new do |s|\n",
        "  s.name = 'Nappa'\n",
        "  s.version = '1.0.0'\n",
        "  s.swift_version = '4.1'\n",
        "end\n",
    );

    #[test]
    fn rewrites_only_version_assignments() {
        let out = rewrite_podspec_version(PODSPEC, "2.1.0").unwrap();
        assert!(out.contains("s.version = '2.1.0'"));
        assert!(out.contains("s.name = 'Nappa'"));
        assert!(out.contains("s.swift_version = '4.1'"));
        assert!(!out.contains("1.0.0"));
    }

    #[test]
    fn aligned_assignments_keep_their_spacing() {
        let podspec = concat!(
            "Pod::Spec.new do |s|\n",
            "  s.name             = 'Nappa'\n",
            "  s.version          = '0.1.0'\n",
            "  s.swift_version    = \"4.1\"\n",
            "end\n",
        );
        let out = rewrite_podspec_version(podspec, "2.0.0").unwrap();
        assert!(out.contains("  s.version          = '2.0.0'\n"));
        assert!(out.contains("s.swift_version    = \"4.1\""));
    }

    #[test]
    fn double_quoted_version_is_rewritten() {
        let out = rewrite_podspec_version("s.version = \"1.0\"", "1.1").unwrap();
        assert_eq!(out, "s.version = \"1.1\"");
    }

    #[test]
    fn podspec_without_version_is_an_error() {
        let err = rewrite_podspec_version("Pod::Spec.new do |s|\nend\n", "1.0.0").unwrap_err();
        assert!(matches!(err, Error::Release { .. }));
    }

    #[test]
    fn dollar_signs_are_literal() {
        let out = rewrite_podspec_version("s.version = '0.1'", "$1").unwrap();
        assert_eq!(out, "s.version = '$1'");
    }

    #[test]
    fn updates_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Nappa.podspec");
        std::fs::write(&path, PODSPEC).unwrap();

        let shell = RecordingShell::succeeding();
        let runner = CommandRunner::with_shell(&shell, OutputManager::buffered());
        update_podspec_version(&runner, &path, "3.0.0").unwrap();

        let updated = std::fs::read_to_string(&path).unwrap();
        assert!(updated.contains("s.version = '3.0.0'"));
    }

    #[test]
    fn dry_run_leaves_podspec_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Nappa.podspec");
        std::fs::write(&path, PODSPEC).unwrap();

        let runner = CommandRunner::new(OutputManager::buffered()).dry_run(true);
        update_podspec_version(&runner, &path, "3.0.0").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), PODSPEC);
    }

    #[test]
    fn agvtool_call_throughs() {
        let shell = RecordingShell::succeeding();
        let runner = CommandRunner::with_shell(&shell, OutputManager::buffered());

        set_version(&runner, "1.2.0").unwrap();
        set_build(&runner, "42").unwrap();
        increment_build_number(&runner).unwrap();

        assert_eq!(
            shell.calls(),
            vec![
                "agvtool new-marketing-version 1.2.0",
                "agvtool new-version -all 42",
                "agvtool next-version -all",
            ]
        );
    }
}
