//! Data-side adapters for Waypost.
//!
//! The [`routing`] module answers travel-time questions for the core
//! [`SelectionCoordinator`](waypost_core::SelectionCoordinator) by asking an
//! OSRM routing service over HTTP.

#![forbid(unsafe_code)]

pub mod routing;

pub use routing::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, OsrmEtaEstimator, OsrmEtaEstimatorConfig,
    ProviderBuildError,
};
