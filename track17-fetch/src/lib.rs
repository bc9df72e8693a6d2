// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # track17 Fetch
//!
//! Transport and session layer for the 17TRACK client library.
//!
//! This crate owns everything between the workflow layer and the network:
//!
//! - [`Transport`] - The capability interface for one HTTP round trip.
//!   [`HttpTransport`] is the standard `reqwest`-backed implementation;
//!   tests (or alternate hosting environments) supply their own.
//! - [`RawResponse`] - The normalized response shape: numeric status, an
//!   ok flag, case-insensitive single-value header lookup, and text/JSON
//!   body readers. Callers never branch on the underlying transport.
//! - [`SessionClient`] - Issues JSON requests through a [`Transport`]
//!   while maintaining the two session cookies the service cares about.
//!   There is no general cookie jar here: every `Set-Cookie` value is
//!   filtered down to the `uid` and `_yq_rc_` names before it is merged
//!   into the session state.
//!
//! No retries happen at this layer; every remote failure is reported
//! upward exactly once.

pub mod cookies;
pub mod error;
pub mod session;
pub mod transport;

// Re-export key types at crate root
pub use cookies::{filter_set_cookie, TRACKED_COOKIES};
pub use error::FetchError;
pub use session::SessionClient;
pub use transport::{HttpTransport, RawResponse, Transport};
