//! Project-level collaborators of the orchestration tasks.
//!
//! - [`config`] - `xcforge.toml` loading and derived names/paths
//! - [`freshness`] - modification-time skip checks
//! - [`credentials`] - upload credentials (environment, default, prompt)
//! - [`version`] - `agvtool` call-throughs and podspec rewriting
//! - [`git`] - release git call-throughs
//! - [`tools`] - external tool detection

pub mod config;
pub mod credentials;
pub mod freshness;
pub mod git;
pub mod tools;
pub mod version;

pub use config::{
    CONFIG_FILE, DestinationMatrix, PLATFORM_ENV, Platform, ProjectConfig, SchemeSettings,
};
pub use credentials::{CredentialProvider, Credentials, FallbackCredentials};
pub use freshness::is_stale;

use std::path::Path;

/// Whether the project manages dependencies with Carthage.
pub fn uses_carthage(project_dir: &Path) -> bool {
    project_dir.join("Cartfile").exists()
}

/// Whether the project manages dependencies with CocoaPods.
pub fn uses_cocoapods(project_dir: &Path) -> bool {
    project_dir.join("Podfile").exists()
}
