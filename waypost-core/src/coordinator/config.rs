//! Framing and refresh settings for [`super::SelectionCoordinator`].

use geo::Coord;

/// Visible map area: a centre and a square span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    /// Centre, `x = longitude`, `y = latitude`.
    pub center: Coord<f64>,
    /// Latitude and longitude delta covered by the view.
    pub span_degrees: f64,
}

impl MapRegion {
    /// Region centred on `center` spanning `span_degrees`.
    #[must_use]
    pub const fn new(center: Coord<f64>, span_degrees: f64) -> Self {
        Self {
            center,
            span_degrees,
        }
    }
}

/// Downtown Toronto, shown before the first location fix.
pub const DEFAULT_REGION: MapRegion = MapRegion::new(
    Coord {
        x: -79.347_015,
        y: 43.651_07,
    },
    FOLLOW_SPAN_DEGREES,
);

const FOLLOW_SPAN_DEGREES: f64 = 0.05;
const FOCUS_SPAN_DEGREES: f64 = 0.02;
const REFRESH_DISTANCE_M: f64 = 250.0;

/// Tunables for the coordinator.
///
/// # Examples
///
/// ```
/// use waypost_core::CoordinatorConfig;
///
/// let config = CoordinatorConfig::default().with_refresh_distance_m(None);
/// assert!(config.refresh_distance_m.is_none());
/// assert_eq!(config.focus_span_degrees, 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatorConfig {
    /// Region shown until a location arrives.
    pub initial_region: MapRegion,
    /// Span used while the camera follows the user.
    pub follow_span_degrees: f64,
    /// Span used when centring on the selected POI.
    pub focus_span_degrees: f64,
    /// Movement that triggers a fresh estimate for an existing selection.
    /// `None` disables location-driven refresh.
    pub refresh_distance_m: Option<f64>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            initial_region: DEFAULT_REGION,
            follow_span_degrees: FOLLOW_SPAN_DEGREES,
            focus_span_degrees: FOCUS_SPAN_DEGREES,
            refresh_distance_m: Some(REFRESH_DISTANCE_M),
        }
    }
}

impl CoordinatorConfig {
    /// Set the region shown before the first fix.
    #[must_use]
    pub const fn with_initial_region(mut self, region: MapRegion) -> Self {
        self.initial_region = region;
        self
    }

    /// Set the span used while following the user.
    #[must_use]
    pub const fn with_follow_span(mut self, degrees: f64) -> Self {
        self.follow_span_degrees = degrees;
        self
    }

    /// Set the span used when centring on a POI.
    #[must_use]
    pub const fn with_focus_span(mut self, degrees: f64) -> Self {
        self.focus_span_degrees = degrees;
        self
    }

    /// Set or disable the movement threshold for refreshing estimates.
    #[must_use]
    pub const fn with_refresh_distance_m(mut self, metres: Option<f64>) -> Self {
        self.refresh_distance_m = metres;
        self
    }
}
