//! OSRM Route API response types and profile mapping.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;
use waypost_core::TransportMode;

/// OSRM status code for a successful request.
const CODE_OK: &str = "Ok";

/// OSRM status code when the points are not connected.
pub(crate) const CODE_NO_ROUTE: &str = "NoRoute";

/// OSRM routing profile for `mode`, or `None` when OSRM cannot route it.
///
/// ```
/// use waypost_core::TransportMode;
/// use waypost_data::routing::profile_for;
///
/// assert_eq!(profile_for(TransportMode::Walking), Some("foot"));
/// assert_eq!(profile_for(TransportMode::Transit), None);
/// ```
#[must_use]
pub const fn profile_for(mode: TransportMode) -> Option<&'static str> {
    match mode {
        TransportMode::Driving => Some("driving"),
        TransportMode::Walking => Some("foot"),
        TransportMode::Transit => None,
    }
}

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code, `"Ok"` on success.
    pub code: String,
    /// Error detail when `code` is not `"Ok"`.
    pub message: Option<String>,
    /// Candidate routes, fastest first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route returned by OSRM.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Expected travel time in seconds.
    pub duration: f64,
    /// Route length in metres.
    pub distance: f64,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}
