//! Presentation values derived from coordinator state.

use geo::Coord;

use crate::{EtaState, PoiId, PointOfInterest, TransportMode};

use super::config::MapRegion;

/// Text shown in place of the map while no location is available.
pub const NO_LOCATION_PLACEHOLDER: &str = "Waiting for location or permission denied";

/// Camera state of the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    /// Currently framed region.
    pub region: MapRegion,
    /// Whether location updates recentre the camera on the user.
    pub follows_user: bool,
}

/// A pin for one POI.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// POI the pin represents.
    pub id: PoiId,
    /// Pin title.
    pub title: String,
    /// Pin position.
    pub location: Coord<f64>,
    /// Whether this POI is the current selection.
    pub selected: bool,
}

/// What the map area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MapView {
    /// No location yet or permission denied.
    Placeholder,
    /// A live map with the user and the filtered POIs.
    Map {
        /// Camera framing.
        camera: MapCamera,
        /// User position.
        user: Coord<f64>,
        /// Pins for the POIs passing the current filters.
        markers: Vec<Marker>,
    },
}

/// Contents of the detail panel for the selected POI.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    /// Selected POI.
    pub poi: PointOfInterest,
    /// Straight-line distance from the user, when a location is known.
    pub distance_km: Option<f64>,
    /// Mode shown in the picker.
    pub transport_mode: TransportMode,
    /// Current estimate.
    pub eta: EtaState,
}

impl DetailPanel {
    /// `"Category: Landmark"`.
    #[must_use]
    pub fn category_line(&self) -> String {
        format!("Category: {}", self.poi.category)
    }

    /// `"Distance: 0.60 km"`, absent without a location.
    #[must_use]
    pub fn distance_line(&self) -> Option<String> {
        self.distance_km.map(|km| format!("Distance: {km:.2} km"))
    }

    /// `"ETA: 7 min"`, absent while nothing was requested.
    #[must_use]
    pub fn eta_line(&self) -> Option<String> {
        self.eta.label().map(|label| format!("ETA: {label}"))
    }
}
