//! Archive, export and upload tasks.

use super::TaskContext;
use crate::error::Result;
use crate::project::{CredentialProvider, is_stale};
use crate::shell::Shell;
use std::path::Path;

/// SDK used when archiving for devices.
const ARCHIVE_SDK: &str = "iphoneos";

/// Builds an `.xcarchive`, unless it is newer than every source file.
pub fn archive<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let config = ctx.config();
    let archive_path = config.archive_path();
    let sources = ctx.project_dir().join(&config.sources);

    if !needs_refresh(ctx, &archive_path, &sources) {
        ctx.output().info("Archive skipped");
        return Ok(());
    }

    ctx.output().info("Archiving...");
    ctx.xcodebuild_for(&config.scheme())
        .archive(ctx.runner(), ARCHIVE_SDK, &archive_path)
}

/// Exports the archive into an `.ipa`, archiving first when needed.
pub fn export_archive<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    archive(ctx)?;

    let config = ctx.config();
    let archive_path = config.archive_path();
    let archive_dir = ctx.project_dir().join(&archive_path);

    if !needs_refresh(ctx, &config.ipa_path(), &archive_dir) {
        ctx.output().info("Export skipped");
        return Ok(());
    }

    ctx.output().info("Exporting IPA...");
    ctx.xcodebuild().export_archive(
        ctx.runner(),
        &archive_path,
        &config.export_dir,
        &config.export_options_path(),
    )
}

/// Exports the `.ipa` and uploads it to TestFlight.
pub fn testflight<S: Shell, C: CredentialProvider>(
    ctx: &TaskContext<S>,
    credentials: &mut C,
) -> Result<()> {
    export_archive(ctx)?;

    ctx.output().info("Uploading IPA to TestFlight...");
    let config = ctx.config();
    let creds = credentials.credentials()?;
    let ipa = config.ipa_path();
    ctx.runner().run([
        config.altool.as_str(),
        "--upload-app -f",
        ipa.as_str(),
        "-u",
        creds.username.as_str(),
        "-p",
        creds.password.as_str(),
    ])
}

/// Freshness check relative to the project directory. Errors while checking
/// (for example a missing sources directory) mean "rebuild".
fn needs_refresh<S: Shell>(ctx: &TaskContext<S>, target: &str, source: &Path) -> bool {
    let target_path = ctx.project_dir().join(target);
    match is_stale(&target_path, &[source]) {
        Ok(true) => true,
        Ok(false) => {
            ctx.output().verbose(&format!("{target} is up to date"));
            false
        }
        Err(e) => {
            log::debug!("freshness check for {} failed: {}", target_path.display(), e);
            true
        }
    }
}
