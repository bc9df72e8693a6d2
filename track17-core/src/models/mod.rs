//! Domain models for the 17TRACK client.
//!
//! ## Submodules
//!
//! - [`package`] - The tracked-package value object
//! - [`status`] - Status vocabulary and code translation

mod package;
mod status;

// Re-export everything at the models level
pub use package::TrackedPackage;
pub use status::{aggregate_counts, PackageStatus};
