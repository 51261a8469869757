//! Immutable, in-memory catalogue of points of interest.
//!
//! A [`PoiCatalog`] is built once at start-up and never mutated. Filtering and
//! category listing are pure functions of the stored POIs and their inputs.

use std::collections::{BTreeSet, HashSet};

use geo::Coord;
use thiserror::Error;

use crate::{PoiId, PointOfInterest};

/// Synthetic category that matches every POI.
pub const ALL_CATEGORIES: &str = "All";

/// Errors returned by [`PoiCatalog::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Two POIs shared an identifier.
    #[error("duplicate point of interest id {0}")]
    DuplicateId(PoiId),
    /// A POI had an empty or whitespace-only name.
    #[error("point of interest {0} has a blank name")]
    BlankName(PoiId),
    /// A POI had an empty or whitespace-only category.
    #[error("point of interest {0} has a blank category")]
    BlankCategory(PoiId),
    /// A POI used the reserved wildcard as its category.
    #[error("point of interest {0} uses the reserved category \"All\"")]
    ReservedCategory(PoiId),
    /// A coordinate was outside WGS84 bounds or not finite.
    #[error("point of interest {id} has invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending POI.
        id: PoiId,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
}

/// Fixed, ordered collection of POIs.
///
/// # Examples
///
/// ```
/// use waypost_core::{ALL_CATEGORIES, PoiCatalog};
///
/// let catalog = PoiCatalog::toronto();
/// let parks = catalog.filter("", "Park");
/// assert!(parks.iter().all(|poi| poi.category == "Park"));
/// assert_eq!(catalog.categories()[0], ALL_CATEGORIES);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoiCatalog {
    pois: Vec<PointOfInterest>,
}

impl PoiCatalog {
    /// Validate and construct a catalogue, preserving the given order.
    pub fn new(pois: Vec<PointOfInterest>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(pois.len());
        for poi in &pois {
            validate(poi)?;
            if !seen.insert(poi.id) {
                return Err(CatalogError::DuplicateId(poi.id));
            }
        }
        Ok(Self { pois })
    }

    /// The built-in downtown Toronto catalogue.
    #[must_use]
    pub fn toronto() -> Self {
        let pois = TORONTO
            .iter()
            .zip(1_u64..)
            .map(|(seed, id)| {
                PointOfInterest::new(
                    PoiId(id),
                    seed.name,
                    seed.description,
                    Coord {
                        x: seed.longitude,
                        y: seed.latitude,
                    },
                    seed.category,
                )
            })
            .collect();
        Self { pois }
    }

    /// Every POI in catalogue order.
    #[must_use]
    pub const fn all(&self) -> &[PointOfInterest] {
        self.pois.as_slice()
    }

    /// Number of POIs in the catalogue.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pois.len()
    }

    /// Whether the catalogue holds no POIs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Look up a POI by identifier.
    #[must_use]
    pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
        self.pois.iter().find(|poi| poi.id == id)
    }

    /// Look up a POI by its exact name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PointOfInterest> {
        let wanted = name.trim().to_lowercase();
        self.pois
            .iter()
            .find(|poi| poi.name.to_lowercase() == wanted)
    }

    /// Distinct categories with [`ALL_CATEGORIES`] first and the rest sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.pois.iter().map(|poi| poi.category.as_str()).collect();
        std::iter::once(ALL_CATEGORIES)
            .chain(distinct)
            .map(str::to_owned)
            .collect()
    }

    /// POIs in `category` whose name contains `query`, in catalogue order.
    ///
    /// [`ALL_CATEGORIES`] matches any category and an empty query matches any
    /// name. Category matching is exact; name matching ignores case.
    #[must_use]
    pub fn filter(&self, query: &str, category: &str) -> Vec<&PointOfInterest> {
        self.pois
            .iter()
            .filter(|poi| category == ALL_CATEGORIES || poi.category == category)
            .filter(|poi| poi.name_contains(query))
            .collect()
    }
}

fn validate(poi: &PointOfInterest) -> Result<(), CatalogError> {
    if poi.name.trim().is_empty() {
        return Err(CatalogError::BlankName(poi.id));
    }
    if poi.category.trim().is_empty() {
        return Err(CatalogError::BlankCategory(poi.id));
    }
    if poi.category == ALL_CATEGORIES {
        return Err(CatalogError::ReservedCategory(poi.id));
    }
    let (latitude, longitude) = (poi.latitude(), poi.longitude());
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(CatalogError::InvalidCoordinate {
            id: poi.id,
            latitude,
            longitude,
        });
    }
    Ok(())
}

struct Seed {
    name: &'static str,
    description: &'static str,
    latitude: f64,
    longitude: f64,
    category: &'static str,
}

const TORONTO: [Seed; 12] = [
    Seed {
        name: "CN Tower",
        description: "Tallest structure in Toronto",
        latitude: 43.6426,
        longitude: -79.3871,
        category: "Landmark",
    },
    Seed {
        name: "High Park",
        description: "Huge park with trails and a zoo",
        latitude: 43.6465,
        longitude: -79.4637,
        category: "Park",
    },
    Seed {
        name: "Union Station",
        description: "Main train hub downtown",
        latitude: 43.6452,
        longitude: -79.3806,
        category: "Transit",
    },
    Seed {
        name: "St. Lawrence Market",
        description: "Famous food and goods market",
        latitude: 43.6487,
        longitude: -79.3716,
        category: "Shopping",
    },
    Seed {
        name: "Toronto Zoo",
        description: "Huge zoo with animals from all over",
        latitude: 43.8177,
        longitude: -79.1859,
        category: "Zoo",
    },
    Seed {
        name: "City Hall",
        description: "Historic Toronto City Hall building",
        latitude: 43.6525,
        longitude: -79.3841,
        category: "Landmark",
    },
    Seed {
        name: "Exhibition Palace",
        description: "Event and fairground complex",
        latitude: 43.6332,
        longitude: -79.4142,
        category: "Park",
    },
    Seed {
        name: "Toronto Metropolitan University",
        description: "Major downtown university campus, formerly Ryerson",
        latitude: 43.6577,
        longitude: -79.3788,
        category: "Landmark",
    },
    Seed {
        name: "Scotiabank Arena",
        description: "Home of the Raptors and Maple Leafs",
        latitude: 43.6435,
        longitude: -79.3791,
        category: "Landmark",
    },
    Seed {
        name: "Hockey Hall of Fame",
        description: "Museum dedicated to the history of hockey",
        latitude: 43.6473,
        longitude: -79.3777,
        category: "Landmark",
    },
    Seed {
        name: "Metro Toronto Convention Centre",
        description: "Large event venue near CN Tower and Union",
        latitude: 43.6430,
        longitude: -79.3860,
        category: "Landmark",
    },
    Seed {
        name: "Ripley's Aquarium",
        description: "Family-friendly aquarium near CN Tower",
        latitude: 43.6424,
        longitude: -79.3860,
        category: "Landmark",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> PoiCatalog {
        PoiCatalog::toronto()
    }

    fn poi(id: u64, name: &str, category: &str) -> PointOfInterest {
        PointOfInterest::new(PoiId(id), name, "", Coord { x: 0.0, y: 0.0 }, category)
    }

    #[rstest]
    fn toronto_catalogue_passes_validation(catalog: PoiCatalog) {
        let rebuilt = PoiCatalog::new(catalog.all().to_vec()).expect("built-in catalogue is valid");
        assert_eq!(rebuilt, catalog);
        assert_eq!(catalog.len(), 12);
    }

    #[rstest]
    fn all_is_stable_across_calls(catalog: PoiCatalog) {
        assert_eq!(catalog.all(), catalog.all());
        assert_eq!(catalog.all()[0].name, "CN Tower");
    }

    #[rstest]
    fn categories_lead_with_wildcard_then_sorted(catalog: PoiCatalog) {
        assert_eq!(
            catalog.categories(),
            vec!["All", "Landmark", "Park", "Shopping", "Transit", "Zoo"]
        );
    }

    #[rstest]
    fn categories_of_empty_catalogue_is_wildcard_only() {
        let empty = PoiCatalog::new(Vec::new()).expect("empty catalogue is valid");
        assert!(empty.is_empty());
        assert_eq!(empty.categories(), vec![ALL_CATEGORIES]);
    }

    #[rstest]
    #[case("", ALL_CATEGORIES, 12)]
    #[case("", "Landmark", 7)]
    #[case("", "landmark", 0)]
    #[case("toronto", ALL_CATEGORIES, 3)]
    #[case("TORONTO", "Zoo", 1)]
    #[case("park", "Park", 1)]
    #[case("nowhere", ALL_CATEGORIES, 0)]
    #[case("", "Museum", 0)]
    fn filter_applies_both_predicates(
        catalog: PoiCatalog,
        #[case] query: &str,
        #[case] category: &str,
        #[case] expected: usize,
    ) {
        let hits = catalog.filter(query, category);
        assert_eq!(hits.len(), expected);
        for hit in hits {
            assert!(catalog.all().contains(hit));
            assert!(category == ALL_CATEGORIES || hit.category == category);
            assert!(hit.name.to_lowercase().contains(&query.to_lowercase()));
        }
    }

    #[rstest]
    fn filter_preserves_catalogue_order(catalog: PoiCatalog) {
        let names: Vec<&str> = catalog
            .filter("to", ALL_CATEGORIES)
            .into_iter()
            .map(|poi| poi.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "CN Tower",
                "Toronto Zoo",
                "Toronto Metropolitan University",
                "Metro Toronto Convention Centre",
            ]
        );
    }

    #[rstest]
    fn lookups_by_id_and_name(catalog: PoiCatalog) {
        let tower = catalog.find_by_name("  cn tower ").expect("known name");
        assert_eq!(catalog.get(tower.id), Some(tower));
        assert!(catalog.find_by_name("cn").is_none());
        assert!(catalog.get(PoiId(999)).is_none());
    }

    #[rstest]
    #[case(vec![poi(1, "A", "Park"), poi(1, "B", "Park")], CatalogError::DuplicateId(PoiId(1)))]
    #[case(vec![poi(2, "  ", "Park")], CatalogError::BlankName(PoiId(2)))]
    #[case(vec![poi(3, "C", "")], CatalogError::BlankCategory(PoiId(3)))]
    #[case(vec![poi(4, "D", ALL_CATEGORIES)], CatalogError::ReservedCategory(PoiId(4)))]
    fn new_rejects_invalid_entries(
        #[case] pois: Vec<PointOfInterest>,
        #[case] expected: CatalogError,
    ) {
        assert_eq!(PoiCatalog::new(pois), Err(expected));
    }

    #[rstest]
    #[case(91.0, 0.0)]
    #[case(0.0, -180.5)]
    #[case(f64::NAN, 0.0)]
    fn new_rejects_out_of_range_coordinates(#[case] latitude: f64, #[case] longitude: f64) {
        let bad = PointOfInterest::new(
            PoiId(9),
            "Nowhere",
            "",
            Coord {
                x: longitude,
                y: latitude,
            },
            "Park",
        );
        let err = PoiCatalog::new(vec![bad]).expect_err("coordinate should be rejected");
        assert!(matches!(err, CatalogError::InvalidCoordinate { id: PoiId(9), .. }));
    }
}
