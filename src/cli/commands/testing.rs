//! Test and build matrices.

use super::TaskContext;
use crate::error::{Error, Result};
use crate::project::Platform;
use crate::shell::Shell;
use crate::xcode::{Destination, DestinationSpec, XcodeBuild};

/// Default test: the iOS scheme on the first configured iOS destination.
pub fn test<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let first = destinations(ctx, Platform::Ios)?
        .first()
        .map(Destination::from)
        .ok_or_else(|| no_destinations(ctx, Platform::Ios))?;
    ctx.output().info("Testing...");
    ctx.xcodebuild_for(&ctx.config().scheme_for(Platform::Ios))
        .destination(&first)
        .test(ctx.runner(), "Debug")
}

/// Tests `platform` on every configured destination in one invocation.
pub fn test_platform<S: Shell>(
    ctx: &TaskContext<S>,
    platform: Platform,
    configuration: &str,
) -> Result<()> {
    ctx.output()
        .info(&format!("Testing {platform} ({configuration})..."));
    matrix(ctx, platform)?.test(ctx.runner(), configuration)
}

/// Builds for every configured watchOS destination. watchOS targets
/// cannot run unit tests on the simulator.
pub fn build_watchos<S: Shell>(ctx: &TaskContext<S>, configuration: &str) -> Result<()> {
    ctx.output()
        .info(&format!("Building watchOS ({configuration})..."));
    matrix(ctx, Platform::WatchOs)?.build(ctx.runner(), configuration)
}

/// Builder for the platform scheme with all of its destinations.
fn matrix<S: Shell>(ctx: &TaskContext<S>, platform: Platform) -> Result<XcodeBuild> {
    let specs = destinations(ctx, platform)?;
    let mut xc = ctx.xcodebuild_for(&ctx.config().scheme_for(platform));
    for spec in specs {
        xc.destination(&Destination::from(spec));
    }
    Ok(xc)
}

fn destinations<S: Shell>(ctx: &TaskContext<S>, platform: Platform) -> Result<&[DestinationSpec]> {
    let specs = ctx.config().destinations.for_platform(platform);
    if specs.is_empty() {
        return Err(no_destinations(ctx, platform));
    }
    Ok(specs)
}

fn no_destinations<S: Shell>(ctx: &TaskContext<S>, platform: Platform) -> Error {
    Error::Config {
        path: ctx.config().source().to_path_buf(),
        reason: format!("no {platform} destinations configured"),
    }
}
