// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # track17 Core
//!
//! Domain models for the 17TRACK client library.
//!
//! This crate holds the pure data types shared by the other `track17`
//! crates; it performs no I/O of its own:
//!
//! - [`TrackedPackage`] - A tracked package as reported by the service
//! - [`PackageStatus`] - The named status vocabulary
//! - [`aggregate_counts`] - Folds raw status-code counts by status name
//!
//! The service reports package state as small integer codes; several
//! distinct codes map to the same named status. The raw code is kept on
//! [`TrackedPackage`] so callers can still see it after translation.

pub mod models;

// Re-export all model types
pub use models::{aggregate_counts, PackageStatus, TrackedPackage};
