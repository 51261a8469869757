//! Straight-line distances between WGS84 coordinates.

use geo::{Coord, Distance, Haversine, Point};

/// Great-circle distance in metres.
#[must_use]
pub fn distance_m(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Great-circle distance in kilometres, rounded to two decimals.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use waypost_core::distance_km;
///
/// let union_station = Coord { x: -79.3806, y: 43.6452 };
/// let cn_tower = Coord { x: -79.3871, y: 43.6426 };
/// assert_eq!(distance_km(union_station, cn_tower), 0.6);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion and rounding require float maths"
)]
pub fn distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    (distance_m(from, to) / 10.0).round() / 100.0
}
