//! Elevation lookups for path points.
//!
//! Each lookup is an independent request against an Open-Elevation compatible
//! service. Requests run off the UI thread and their results are collected with
//! [`ElevationFetcher::poll`], tagged with whatever ticket the caller supplied.

pub mod api;
pub mod error;
pub mod fetcher;

pub use api::{DEFAULT_API_URL, OpenElevation};
pub use error::ElevationError;
pub use fetcher::{ElevationFetcher, ElevationMessage};

#[cfg(not(target_arch = "wasm32"))]
pub use api::ElevationProvider;
