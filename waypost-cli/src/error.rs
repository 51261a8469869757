//! Error types emitted by the Waypost CLI.

use std::sync::Arc;

use thiserror::Error;
use waypost_core::{ParseTransportModeError, SelectionError};
use waypost_data::ProviderBuildError;

/// Errors emitted by the Waypost CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Only one half of a coordinate pair was supplied.
    #[error("--{missing} is required when --{given} is set")]
    IncompleteLocation {
        /// Flag that was supplied.
        given: &'static str,
        /// Flag that is missing.
        missing: &'static str,
    },
    /// The supplied coordinate is not a valid WGS84 position.
    #[error("({latitude}, {longitude}) is not a valid latitude/longitude pair")]
    InvalidCoordinate {
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// The transport mode could not be parsed.
    #[error(transparent)]
    InvalidMode(#[from] ParseTransportModeError),
    /// The category filter names no known category.
    #[error("unknown category {category:?} (expected one of: {known})")]
    UnknownCategory {
        /// Requested category.
        category: String,
        /// Comma-separated list of valid categories.
        known: String,
    },
    /// No POI carries the requested name.
    #[error("no point of interest named {name:?}")]
    UnknownPoi {
        /// Requested name.
        name: String,
    },
    /// The coordinator rejected a selection.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Constructing the travel-time estimator failed.
    #[error("failed to build travel time estimator for {base_url:?}: {source}")]
    BuildEstimator {
        /// Configured OSRM endpoint.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Serializing JSON output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
