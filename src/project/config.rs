//! Project configuration loaded from `xcforge.toml`.

use crate::error::{Error, Result};
use crate::xcode::DestinationSpec;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project directory.
pub const CONFIG_FILE: &str = "xcforge.toml";

/// Environment variable overriding [`ProjectConfig::platform`].
pub const PLATFORM_ENV: &str = "platform";

const DEFAULT_ALTOOL: &str = concat!(
    "/Applications/Xcode.app/Contents/Applications/Application\\ Loader.app",
    "/Contents/Frameworks/ITunesSoftwareService.framework/Support/altool",
);

/// Apple platform a scheme or test matrix targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    MacOs,
    TvOs,
    WatchOs,
}

impl Platform {
    /// Name as used in scheme suffixes and by Carthage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::MacOs => "macOS",
            Platform::TvOs => "tvOS",
            Platform::WatchOs => "watchOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-platform scheme names. Unset entries default to `<name>-<Platform>`.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SchemeSettings {
    pub ios: Option<String>,
    pub macos: Option<String>,
    pub tvos: Option<String>,
    pub watchos: Option<String>,
}

/// Destinations tested (or, for watchOS, built) per platform.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct DestinationMatrix {
    pub ios: Vec<DestinationSpec>,
    pub macos: Vec<DestinationSpec>,
    pub tvos: Vec<DestinationSpec>,
    pub watchos: Vec<DestinationSpec>,
}

impl Default for DestinationMatrix {
    fn default() -> Self {
        Self {
            ios: vec![
                DestinationSpec::simulator("11.3", "iPhone X"),
                DestinationSpec::simulator("10.3.1", "iPhone 7 Plus"),
                DestinationSpec::simulator("9.0", "iPhone 5s"),
            ],
            macos: vec![DestinationSpec::Mac],
            tvos: vec![
                DestinationSpec::simulator("11.3", "Apple TV 4K"),
                DestinationSpec::simulator("10.2", "Apple TV 1080p"),
                DestinationSpec::simulator("9.0", "Apple TV 1080p"),
            ],
            watchos: vec![
                DestinationSpec::simulator("4.3", "Apple Watch Series 3 - 42mm"),
                DestinationSpec::simulator("3.2", "Apple Watch Series 2 - 42mm"),
                DestinationSpec::simulator("2.0", "Apple Watch - 38mm"),
            ],
        }
    }
}

impl DestinationMatrix {
    /// Destinations configured for `platform`.
    pub fn for_platform(&self, platform: Platform) -> &[DestinationSpec] {
        match platform {
            Platform::Ios => &self.ios,
            Platform::MacOs => &self.macos,
            Platform::TvOs => &self.tvos,
            Platform::WatchOs => &self.watchos,
        }
    }
}

/// Project configuration.
///
/// Every key is optional:
///
/// ```toml
/// name = "Nappa"
/// platform = "iOS"
/// export_dir = "./build/"
///
/// [schemes]
/// ios = "Nappa_iOS"
///
/// [destinations]
/// macos = [{ kind = "mac" }]
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Product name; defaults to the project directory name
    pub name: String,

    /// Workspace file. Default: `<name>.xcworkspace`
    pub workspace: Option<String>,

    /// Main scheme. Default: `<name>`
    pub scheme: Option<String>,

    /// Platform handed to Carthage (`all`, `iOS`, ...). Default: `all`
    pub platform: String,

    /// Sources directory used for archive freshness. Default: `./Sources`
    pub sources: PathBuf,

    /// Export directory, kept as a prefix string. Default: `./build/`
    pub export_dir: String,

    /// Static fallback iTunes Connect user. Default: empty
    pub itunes_user: String,

    /// Static fallback iTunes Connect password. Default: empty
    pub itunes_password: String,

    /// Path to the upload tool, already shell escaped
    pub altool: String,

    pub schemes: SchemeSettings,

    pub destinations: DestinationMatrix,

    /// File the values were read from, or would have been.
    #[serde(skip)]
    source: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            workspace: None,
            scheme: None,
            platform: "all".to_string(),
            sources: PathBuf::from("./Sources"),
            export_dir: "./build/".to_string(),
            itunes_user: String::new(),
            itunes_password: String::new(),
            altool: DEFAULT_ALTOOL.to_string(),
            schemes: SchemeSettings::default(),
            destinations: DestinationMatrix::default(),
            source: PathBuf::from(CONFIG_FILE),
        }
    }
}

impl ProjectConfig {
    /// Configuration with defaults for a product called `name`.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Loads the configuration for `project_dir`.
    ///
    /// Without `config_path`, `xcforge.toml` in `project_dir` is read when it
    /// exists and every value is defaulted otherwise. An explicit
    /// `config_path` (relative paths are resolved against `project_dir`) must
    /// exist. A missing `name` falls back to the project directory's file
    /// name.
    pub fn load(project_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => project_dir.join(p),
            None => project_dir.join(CONFIG_FILE),
        };

        let mut config = if path.is_file() {
            log::debug!("Loading project configuration from {}", path.display());
            let raw = std::fs::read_to_string(&path)?;
            toml::from_str::<ProjectConfig>(&raw).map_err(|e| Error::Config {
                path: path.clone(),
                reason: e.to_string(),
            })?
        } else if config_path.is_some() {
            return Err(Error::Config {
                path,
                reason: "file not found".to_string(),
            });
        } else {
            log::debug!("No {} found, using defaults", path.display());
            ProjectConfig::default()
        };
        config.source = path.clone();

        if config.name.trim().is_empty() {
            config.name = directory_name(project_dir).ok_or_else(|| Error::Config {
                path: path.clone(),
                reason: "`name` is not set and cannot be derived from the project directory"
                    .to_string(),
            })?;
        }

        Ok(config)
    }

    /// Applies the value of the `platform` environment variable, if any.
    pub fn with_platform_override(mut self, value: Option<String>) -> Self {
        if let Some(platform) = value.filter(|p| !p.is_empty()) {
            self.platform = platform;
        }
        self
    }

    /// Path of the configuration file, for error messages.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn workspace(&self) -> String {
        self.workspace
            .clone()
            .unwrap_or_else(|| format!("{}.xcworkspace", self.name))
    }

    pub fn scheme(&self) -> String {
        self.scheme.clone().unwrap_or_else(|| self.name.clone())
    }

    /// Scheme for a platform, `<name>-<Platform>` unless configured.
    pub fn scheme_for(&self, platform: Platform) -> String {
        let configured = match platform {
            Platform::Ios => &self.schemes.ios,
            Platform::MacOs => &self.schemes.macos,
            Platform::TvOs => &self.schemes.tvos,
            Platform::WatchOs => &self.schemes.watchos,
        };
        configured
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.name, platform))
    }

    pub fn archive_path(&self) -> String {
        format!("{}{}.xcarchive", self.export_dir, self.name)
    }

    pub fn export_options_path(&self) -> String {
        format!("{}ExportOptions.plist", self.export_dir)
    }

    pub fn ipa_path(&self) -> String {
        format!("{}{}.ipa", self.export_dir, self.name)
    }

    pub fn podspec_path(&self) -> String {
        format!("{}.podspec", self.name)
    }
}

fn directory_name(dir: &Path) -> Option<String> {
    let absolute = std::fs::canonicalize(dir).ok()?;
    absolute
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xcode::Destination;

    #[test]
    fn derived_names_and_paths() {
        let config = ProjectConfig::named("Nappa");
        assert_eq!(config.workspace(), "Nappa.xcworkspace");
        assert_eq!(config.scheme(), "Nappa");
        assert_eq!(config.scheme_for(Platform::Ios), "Nappa-iOS");
        assert_eq!(config.scheme_for(Platform::WatchOs), "Nappa-watchOS");
        assert_eq!(config.archive_path(), "./build/Nappa.xcarchive");
        assert_eq!(config.export_options_path(), "./build/ExportOptions.plist");
        assert_eq!(config.ipa_path(), "./build/Nappa.ipa");
        assert_eq!(config.podspec_path(), "Nappa.podspec");
        assert_eq!(config.platform, "all");
    }

    #[test]
    fn loads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
name = "Nappa"
export_dir = "out/"

[schemes]
ios = "Nappa_iOS"

[destinations]
ios = [{ kind = "generic", platform = "iOS Simulator" }]
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path(), None).unwrap();

        assert_eq!(config.scheme_for(Platform::Ios), "Nappa_iOS");
        assert_eq!(config.scheme_for(Platform::TvOs), "Nappa-tvOS");
        assert_eq!(config.ipa_path(), "out/Nappa.ipa");
        let ios: Vec<Destination> = config
            .destinations
            .for_platform(Platform::Ios)
            .iter()
            .map(Destination::from)
            .collect();
        assert_eq!(ios, vec![Destination::generic("iOS Simulator")]);
        // untouched sections keep their defaults
        assert_eq!(config.destinations.for_platform(Platform::TvOs).len(), 3);
    }

    #[test]
    fn missing_file_uses_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Widget");
        std::fs::create_dir(&project).unwrap();

        let config = ProjectConfig::load(&project, None).unwrap();

        assert_eq!(config.name, "Widget");
        assert_eq!(config.workspace(), "Widget.xcworkspace");
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "name = \"FromFile\"").unwrap();

        let err = ProjectConfig::load(dir.path(), Some(Path::new("typo.toml"))).unwrap_err();

        match err {
            Error::Config { path, .. } => assert_eq!(path, dir.path().join("typo.toml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn explicit_path_is_read_and_remembered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ci.toml"), "name = \"Nappa\"").unwrap();

        let config = ProjectConfig::load(dir.path(), Some(Path::new("ci.toml"))).unwrap();

        assert_eq!(config.name, "Nappa");
        assert_eq!(config.source(), dir.path().join("ci.toml"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "name = [").unwrap();

        let err = ProjectConfig::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn platform_override() {
        let config = ProjectConfig::named("Nappa").with_platform_override(Some("iOS".into()));
        assert_eq!(config.platform, "iOS");

        let config = ProjectConfig::named("Nappa").with_platform_override(Some(String::new()));
        assert_eq!(config.platform, "all");

        let config = ProjectConfig::named("Nappa").with_platform_override(None);
        assert_eq!(config.platform, "all");
    }

    #[test]
    fn default_matrices_match_supported_devices() {
        let matrix = DestinationMatrix::default();
        assert_eq!(
            Destination::from(&matrix.for_platform(Platform::Ios)[0]).as_str(),
            "'OS=11.3,name=iPhone X'"
        );
        assert_eq!(
            matrix.for_platform(Platform::MacOs),
            &[DestinationSpec::Mac]
        );
        assert_eq!(matrix.for_platform(Platform::WatchOs).len(), 3);
    }
}
