//! Carthage and CocoaPods tasks.

use super::TaskContext;
use crate::error::Result;
use crate::project::{uses_carthage, uses_cocoapods};
use crate::shell::Shell;

/// Installs all dependencies.
pub fn bootstrap<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let platform = ctx.platform();
    ctx.output().info("Bootstrapping...");
    let runner = ctx.runner();
    if uses_carthage(ctx.project_dir()) {
        runner.run([
            "carthage bootstrap --no-use-binaries --configuration Debug --cache-builds --platform",
            platform,
        ])?;
    }
    if uses_cocoapods(ctx.project_dir()) {
        runner.run(["pod repo update"])?;
        runner.run(["pod install"])?;
    }
    Ok(())
}

/// Updates all dependencies.
pub fn update<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let platform = ctx.platform();
    ctx.output().info("Updating...");
    let runner = ctx.runner();
    if uses_carthage(ctx.project_dir()) {
        runner.run([
            "carthage update --no-use-binaries --configuration Debug --cache-builds --platform",
            platform,
        ])?;
    }
    if uses_cocoapods(ctx.project_dir()) {
        runner.run(["pod update"])?;
    }
    Ok(())
}

/// Installs or upgrades the dependency managers.
pub fn update_tools<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    ctx.output().info("Updating tools...");
    let runner = ctx.runner();
    runner.run(["brew update"])?;
    runner.run(["brew outdated carthage || brew upgrade carthage"])?;
    runner.run(["gem install cocoapods"])
}

/// Cleans, bootstraps, then builds the framework with Carthage.
pub fn build_framework<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let platform = ctx.platform();
    super::clean(ctx)?;
    bootstrap(ctx)?;
    ctx.output().info("Building...");
    ctx.runner().run([
        "carthage build --no-skip-current --cache-builds --platform",
        platform,
    ])
}

pub fn archive_framework<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let name = &ctx.config().name;
    ctx.runner().run(["carthage archive", name.as_str()])
}

pub fn pod_lint<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    let runner = ctx.runner();
    runner.run(["pod repo update"])?;
    runner.run(["pod lib lint --verbose --allow-warnings"])
}

pub fn pod_push<S: Shell>(ctx: &TaskContext<S>) -> Result<()> {
    ctx.runner().run(["pod trunk push"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::tests::context;
    use crate::shell::RecordingShell;

    #[test]
    fn bootstrap_without_manifests_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        bootstrap(&ctx).unwrap();

        assert!(shell.calls().is_empty());
    }

    #[test]
    fn bootstrap_with_carthage_and_pods() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cartfile"), "").unwrap();
        std::fs::write(dir.path().join("Podfile"), "").unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        bootstrap(&ctx).unwrap();

        let platform = ctx.platform().to_string();
        assert_eq!(
            shell.calls(),
            vec![
                format!(
                    "carthage bootstrap --no-use-binaries --configuration Debug --cache-builds --platform {platform}"
                ),
                "pod repo update".to_string(),
                "pod install".to_string(),
            ]
        );
    }

    #[test]
    fn update_with_pods_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Podfile"), "").unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        update(&ctx).unwrap();

        assert_eq!(shell.calls(), vec!["pod update"]);
    }

    #[test]
    fn build_framework_cleans_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cartfile"), "").unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        build_framework(&ctx).unwrap();

        let calls = shell.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].contains("xcodebuild clean -alltargets"));
        assert!(calls[1].starts_with("carthage bootstrap"));
        assert!(calls[2].starts_with("carthage build --no-skip-current --cache-builds --platform"));
    }

    #[test]
    fn framework_and_pod_publishing() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::succeeding();
        let ctx = context(&shell, dir.path());

        archive_framework(&ctx).unwrap();
        pod_lint(&ctx).unwrap();
        pod_push(&ctx).unwrap();
        update_tools(&ctx).unwrap();

        assert_eq!(
            shell.calls(),
            vec![
                "carthage archive Nappa",
                "pod repo update",
                "pod lib lint --verbose --allow-warnings",
                "pod trunk push",
                "brew update",
                "brew outdated carthage || brew upgrade carthage",
                "gem install cocoapods",
            ]
        );
    }
}
