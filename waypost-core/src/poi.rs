use std::fmt;

use geo::Coord;

/// Opaque identifier of a [`PointOfInterest`] within a catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PoiId(pub u64);

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named location worth visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypost_core::{PoiId, PointOfInterest};
///
/// let poi = PointOfInterest::new(
///     PoiId(1),
///     "CN Tower",
///     "Tallest structure in Toronto",
///     Coord { x: -79.3871, y: 43.6426 },
///     "Landmark",
/// );
///
/// assert_eq!(poi.id, PoiId(1));
/// assert_eq!(poi.latitude(), 43.6426);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Unique identifier.
    pub id: PoiId,
    /// Display name.
    pub name: String,
    /// Short free-form description.
    pub description: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Category label, e.g. `"Landmark"`.
    pub category: String,
}

impl PointOfInterest {
    /// Construct a `PointOfInterest`.
    pub fn new(
        id: PoiId,
        name: impl Into<String>,
        description: impl Into<String>,
        location: Coord<f64>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            location,
            category: category.into(),
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Case-insensitive substring match against the name.
    ///
    /// An empty `query` matches every POI.
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
