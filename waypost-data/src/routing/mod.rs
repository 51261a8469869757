//! Travel-time estimation backed by an OSRM routing service.
//!
//! [`OsrmEtaEstimator`] implements [`waypost_core::EtaEstimator`] with the
//! OSRM Route API. The trait is synchronous so the core stays free of any
//! async runtime; the estimator blocks on its own Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use waypost_core::{EtaEstimator, EtaRequest, TransportMode};
//! use waypost_data::routing::{OsrmEtaEstimator, OsrmEtaEstimatorConfig};
//!
//! let config = OsrmEtaEstimatorConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10));
//! let estimator = OsrmEtaEstimator::with_config(config)?;
//!
//! let eta = estimator.estimate(&EtaRequest {
//!     origin: Coord { x: -79.3806, y: 43.6452 },
//!     destination: Coord { x: -79.3871, y: 43.6426 },
//!     mode: TransportMode::Walking,
//! })?;
//! println!("about {} seconds", eta.as_secs());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use osrm::profile_for;
pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, OsrmEtaEstimator, OsrmEtaEstimatorConfig,
    ProviderBuildError,
};
