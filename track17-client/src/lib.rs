// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # track17 Client
//!
//! Workflow layer of the 17TRACK client library.
//!
//! [`Profile`] exposes the public operations - login, list packages,
//! status summary, add / rename / archive / delete - by composing calls
//! through a [`track17_fetch::SessionClient`] against the service's two
//! JSON-RPC endpoints.
//!
//! The service addresses packages by an opaque internal id it assigns at
//! creation, while this library's surface addresses them by the
//! user-supplied tracking number. There is no remote
//! lookup-by-tracking-number call, so rename-after-add, archive, and
//! delete each start with a fresh list fetch to resolve one identifier
//! into the other. Nothing is cached between resolutions; freshness wins
//! over latency when the catalog changes underneath us.
//!
//! ## Example
//!
//! ```ignore
//! use track17_client::Profile;
//!
//! let mut profile = Profile::new()?;
//! if profile.login("user@example.com", "hunter2").await? {
//!     for package in profile.packages(None, false, "UTC").await? {
//!         println!("{}: {}", package.tracking_number, package.status_name());
//!     }
//! }
//! ```

pub mod error;
pub mod profile;
mod wire;

// Re-export key types at crate root
pub use error::ClientError;
pub use profile::{AddOutcome, Profile, API_URL_BUYER, API_URL_USER};

// Domain types callers will want alongside the workflows
pub use track17_core::{aggregate_counts, PackageStatus, TrackedPackage};
