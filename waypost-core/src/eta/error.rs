use thiserror::Error;

use crate::TransportMode;

/// Errors from [`crate::eta::EtaEstimator::estimate`].
///
/// None of these are fatal: the coordinator renders every variant as the
/// "unavailable" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EtaError {
    /// The service found no route between the two points.
    #[error("no route found between origin and destination")]
    NoRoute,
    /// The service cannot route with the requested mode.
    #[error("transport mode {0} is not supported by this estimator")]
    UnsupportedMode(TransportMode),
    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The service reported an application-level failure.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `"NoRoute"`.
        code: String,
        /// Error detail.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error.
        message: String,
    },
    /// The request could not be handed to a worker.
    #[error("failed to dispatch estimate request: {message}")]
    Dispatch {
        /// Error detail.
        message: String,
    },
}
