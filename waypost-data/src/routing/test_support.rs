//! Routing doubles for tests that must not touch the network.

use std::time::Duration;

use waypost_core::{EtaError, EtaEstimator, EtaRequest};

use super::profile_for;

/// Stub estimator that applies OSRM's mode rules without a server.
///
/// Transit is rejected with [`EtaError::UnsupportedMode`] just like the real
/// estimator; every other mode receives the configured answer.
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use waypost_core::{EtaEstimator, EtaRequest, TransportMode};
/// use waypost_data::routing::test_support::StubRouteEstimator;
///
/// let stub = StubRouteEstimator::with_duration(Duration::from_secs(300));
/// let request = EtaRequest {
///     origin: Coord { x: 0.0, y: 0.0 },
///     destination: Coord { x: 0.01, y: 0.01 },
///     mode: TransportMode::Walking,
/// };
/// assert_eq!(stub.estimate(&request), Ok(Duration::from_secs(300)));
/// ```
#[derive(Debug, Clone)]
pub struct StubRouteEstimator {
    response: Result<Duration, EtaError>,
}

impl StubRouteEstimator {
    /// Answer every routable request with `duration`.
    #[must_use]
    pub const fn with_duration(duration: Duration) -> Self {
        Self {
            response: Ok(duration),
        }
    }

    /// Fail every routable request with `error`.
    #[must_use]
    pub const fn with_error(error: EtaError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl EtaEstimator for StubRouteEstimator {
    fn estimate(&self, request: &EtaRequest) -> Result<Duration, EtaError> {
        if profile_for(request.mode).is_none() {
            return Err(EtaError::UnsupportedMode(request.mode));
        }
        self.response.clone()
    }
}
