//! Build and test destinations for `xcodebuild -destination`.

use std::fmt;

/// A target environment for `xcodebuild`, already quoted for the shell.
///
/// Destinations are plain values: construct one per device or platform and
/// hand it to [`XcodeBuild::destination`](super::XcodeBuild::destination).
///
/// # Examples
///
/// ```
/// use xcforge::Destination;
///
/// assert_eq!(Destination::mac().as_str(), "'arch=x86_64'");
/// assert_eq!(
///     Destination::simulator("11.3", "iPhone X").to_string(),
///     "'OS=11.3,name=iPhone X'"
/// );
/// assert_eq!(Destination::generic("iOS").as_str(), "'generic/platform=iOS'");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    /// The host Mac, by architecture.
    pub fn mac() -> Self {
        Self("'arch=x86_64'".to_string())
    }

    /// A simulator identified by OS version and device name.
    ///
    /// Single quotes inside `name` are not escaped.
    pub fn simulator(os_version: &str, name: &str) -> Self {
        Self(format!("'OS={os_version},name={name}'"))
    }

    /// Any device of a platform, e.g. `iOS` or `iOS Simulator`.
    pub fn generic(platform: &str) -> Self {
        Self(format!("'generic/platform={platform}'"))
    }

    /// The rendered `-destination` value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination as written in `xcforge.toml`.
///
/// ```toml
/// [destinations]
/// ios = [
///     { kind = "simulator", os = "11.3", name = "iPhone X" },
///     { kind = "generic", platform = "iOS Simulator" },
/// ]
/// macos = [{ kind = "mac" }]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DestinationSpec {
    /// See [`Destination::mac`]
    Mac,
    /// See [`Destination::simulator`]
    Simulator {
        /// OS version, e.g. `11.3`
        os: String,
        /// Device name, e.g. `iPhone X`
        name: String,
    },
    /// See [`Destination::generic`]
    Generic {
        /// Platform identifier
        platform: String,
    },
}

impl DestinationSpec {
    /// Shorthand for a simulator spec.
    pub fn simulator(os: &str, name: &str) -> Self {
        Self::Simulator {
            os: os.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<&DestinationSpec> for Destination {
    fn from(spec: &DestinationSpec) -> Self {
        match spec {
            DestinationSpec::Mac => Destination::mac(),
            DestinationSpec::Simulator { os, name } => Destination::simulator(os, name),
            DestinationSpec::Generic { platform } => Destination::generic(platform),
        }
    }
}
