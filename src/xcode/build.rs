//! Fluent builder for `xcodebuild` command lines.

use super::Destination;
use crate::error::Result;
use crate::shell::{CommandRunner, Shell};

/// Build driver executable.
pub const XCODEBUILD: &str = "xcodebuild";

/// Formatter the output is piped through when pretty output is enabled.
pub const XCPRETTY: &str = "xcpretty";

/// Builder for a single `xcodebuild` invocation.
///
/// Arguments are kept in the order they are added; that order is the order
/// they appear on the rendered command line. Nothing is ever removed or
/// deduplicated, so calling [`destination`](Self::destination) several times
/// targets several devices in one run.
///
/// The composite operations ([`archive`](Self::archive),
/// [`export_archive`](Self::export_archive), [`build`](Self::build),
/// [`test`](Self::test), [`clean`](Self::clean)) finish the command and
/// execute it through the given [`CommandRunner`].
///
/// # Examples
///
/// ```
/// use xcforge::{CommandRunner, Destination, OutputManager, XcodeBuild};
///
/// # fn example() -> xcforge::Result<()> {
/// let runner = CommandRunner::new(OutputManager::buffered()).dry_run(true);
///
/// let mut xc = XcodeBuild::default();
/// xc.destination(&Destination::simulator("1.0", "iPhone X"))
///     .build(&runner, "Debug")?;
///
/// assert_eq!(
///     xc.render_command(),
///     "xcodebuild -destination 'OS=1.0,name=iPhone X' -configuration Debug ONLY_ACTIVE_ARCH=NO build"
/// );
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XcodeBuild {
    pretty: bool,
    args: Vec<String>,
}

impl XcodeBuild {
    /// Creates a builder with pretty output enabled.
    pub fn new() -> Self {
        let mut xc = Self::default();
        xc.use_pretty_output();
        xc
    }

    /// Creates a pretty builder already pointed at a workspace and scheme.
    ///
    /// Empty values are skipped, like [`workspace`](Self::workspace) and
    /// [`scheme`](Self::scheme) do.
    pub fn with_workspace(workspace: &str, scheme: &str) -> Self {
        let mut xc = Self::new();
        xc.workspace(workspace).scheme(scheme);
        xc
    }

    /// Renders the full command line.
    ///
    /// With pretty output the command is wrapped as
    /// `set -o pipefail && <command> | xcpretty -c` so the formatter does not
    /// hide a failing exit status.
    pub fn render_command(&self) -> String {
        let mut cmd = String::from(XCODEBUILD);
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        if self.pretty {
            cmd = format!("set -o pipefail && {cmd} | {XCPRETTY} -c");
        }
        cmd
    }

    /// Arguments accumulated so far, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Whether the output will be piped through `xcpretty`.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Renders and executes the command.
    pub fn run<S: Shell>(&self, runner: &CommandRunner<S>) -> Result<()> {
        runner.run([self.render_command()])
    }

    /// Archives with the `Release` configuration.
    ///
    /// # Arguments
    ///
    /// * `sdk` - SDK name, e.g. `iphoneos`
    /// * `path` - Where the `.xcarchive` is written
    pub fn archive<S: Shell>(
        &mut self,
        runner: &CommandRunner<S>,
        sdk: &str,
        path: &str,
    ) -> Result<()> {
        self.add_kv_argument("-sdk", sdk)
            .add_kv_argument("-archivePath", path)
            .configuration("Release")
            .action("archive")
            .run(runner)
    }

    /// Exports an archive (typically into an `.ipa`).
    ///
    /// # Arguments
    ///
    /// * `archive_path` - Existing `.xcarchive`
    /// * `export_path` - Output directory
    /// * `export_options_path` - `ExportOptions.plist`
    pub fn export_archive<S: Shell>(
        &mut self,
        runner: &CommandRunner<S>,
        archive_path: &str,
        export_path: &str,
        export_options_path: &str,
    ) -> Result<()> {
        self.add_kv_argument("-archivePath", archive_path)
            .add_kv_argument("-exportPath", export_path)
            .add_kv_argument("-exportOptionsPlist", export_options_path)
            .add_argument("-allowProvisioningUpdates")
            .action("-exportArchive")
            .run(runner)
    }

    /// Builds for every destination added so far.
    pub fn build<S: Shell>(
        &mut self,
        runner: &CommandRunner<S>,
        configuration: &str,
    ) -> Result<()> {
        self.configuration(configuration)
            .disable_only_active_arch()
            .action("build")
            .run(runner)
    }

    /// Tests on every destination added so far.
    pub fn test<S: Shell>(
        &mut self,
        runner: &CommandRunner<S>,
        configuration: &str,
    ) -> Result<()> {
        self.configuration(configuration)
            .disable_only_active_arch()
            .enable_testability()
            .action("test")
            .run(runner)
    }

    /// Cleans all targets.
    pub fn clean<S: Shell>(&mut self, runner: &CommandRunner<S>) -> Result<()> {
        self.action("clean").all_targets().run(runner)
    }

    /// Appends a bare action such as `build`. Empty values are skipped.
    pub fn action(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.add_argument(value);
        }
        self
    }

    /// `-workspace <value>`, skipped when empty.
    pub fn workspace(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.add_kv_argument("-workspace", value);
        }
        self
    }

    /// `-scheme <value>`, skipped when empty.
    pub fn scheme(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.add_kv_argument("-scheme", value);
        }
        self
    }

    /// `-destination <value>`. May be called repeatedly.
    pub fn destination(&mut self, value: &Destination) -> &mut Self {
        self.add_kv_argument("-destination", value.as_str())
    }

    /// `-configuration <value>`, skipped when empty.
    pub fn configuration(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.add_kv_argument("-configuration", value);
        }
        self
    }

    pub fn use_new_build_system(&mut self) -> &mut Self {
        self.add_argument("-UseNewBuildSystem=YES")
    }

    pub fn enable_testability(&mut self) -> &mut Self {
        self.add_argument("ENABLE_TESTABILITY=YES")
    }

    pub fn disable_only_active_arch(&mut self) -> &mut Self {
        self.add_argument("ONLY_ACTIVE_ARCH=NO")
    }

    pub fn all_targets(&mut self) -> &mut Self {
        self.add_argument("-alltargets")
    }

    /// Pipes the output through `xcpretty -c`.
    pub fn use_pretty_output(&mut self) -> &mut Self {
        self.pretty = true;
        self
    }

    /// Leaves the raw `xcodebuild` output alone.
    pub fn disable_pretty_output(&mut self) -> &mut Self {
        self.pretty = false;
        self
    }

    /// Appends `arg` verbatim.
    pub fn add_argument(&mut self, arg: &str) -> &mut Self {
        self.args.push(arg.to_string());
        self
    }

    /// Appends `key value` as a single argument so the pair stays adjacent.
    pub fn add_kv_argument(&mut self, key: &str, value: &str) -> &mut Self {
        self.add_argument(&format!("{key} {value}"))
    }
}
