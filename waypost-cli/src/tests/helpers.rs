//! Test doubles and output capture for CLI commands.

use super::*;
use crate::show::{BoxedEstimator, EstimatorBuilder, ShowConfig};
use std::time::Duration;
use waypost_core::{EtaError, TransportMode, UserLocation};
use waypost_data::routing::test_support::StubRouteEstimator;

pub(super) const UNION_STATION: (f64, f64) = (43.6452, -79.3806);

/// Builder handing out a stub instead of an HTTP estimator.
pub(super) struct StubBuilder {
    response: Result<Duration, EtaError>,
}

impl StubBuilder {
    pub(super) const fn answering(duration: Duration) -> Self {
        Self {
            response: Ok(duration),
        }
    }

    pub(super) const fn failing(error: EtaError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl EstimatorBuilder for StubBuilder {
    fn build(&self, _config: &ShowConfig) -> Result<BoxedEstimator, CliError> {
        let stub = match &self.response {
            Ok(duration) => StubRouteEstimator::with_duration(*duration),
            Err(error) => StubRouteEstimator::with_error(error.clone()),
        };
        Ok(Box::new(stub))
    }
}

pub(super) fn show_config(name: &str, location: Option<(f64, f64)>, mode: TransportMode) -> ShowConfig {
    ShowConfig {
        name: name.to_owned(),
        location: location.map(|(latitude, longitude)| UserLocation::new(latitude, longitude)),
        mode,
        osrm_base_url: "http://localhost:5000".to_owned(),
        timeout: Duration::from_secs(5),
    }
}

/// Run `f` against an in-memory writer and return what it wrote.
pub(super) fn capture(
    f: impl FnOnce(&mut dyn std::io::Write) -> Result<(), CliError>,
) -> Result<String, CliError> {
    let mut buffer = Vec::new();
    f(&mut buffer)?;
    Ok(String::from_utf8(buffer).expect("output is UTF-8"))
}
