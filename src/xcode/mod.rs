//! `xcodebuild` command construction.
//!
//! - [`destination`] - [`Destination`] values and their config-file form
//! - [`build`] - the [`XcodeBuild`] argument builder and its composite
//!   operations

mod build;
mod destination;

pub use build::{XCODEBUILD, XCPRETTY, XcodeBuild};
pub use destination::{Destination, DestinationSpec};
