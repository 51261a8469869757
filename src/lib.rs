//! Facade crate for the Waypost POI browser.
//!
//! Re-exports the core domain and state types, plus the OSRM travel-time
//! estimator behind the `osrm` feature.

#![forbid(unsafe_code)]

pub use waypost_core::{
    ALL_CATEGORIES, AuthorizationStatus, CatalogError, CoordinatorConfig, DetailPanel,
    EtaCompletion, EtaDispatcher, EtaError, EtaEstimator, EtaRequest, EtaState, EtaTicket,
    LocationEvent, LocationProvider, LocationSource, MapCamera, MapRegion, MapView, Marker,
    NO_LOCATION_PLACEHOLDER, PoiCatalog, PoiId, PointOfInterest, RequestToken,
    SelectionCoordinator, SelectionError, SelectionState, ThreadDispatcher, TransportMode,
    UNAVAILABLE_LABEL, UserLocation, distance_km,
};

#[cfg(feature = "osrm")]
pub use waypost_data::{OsrmEtaEstimator, OsrmEtaEstimatorConfig, ProviderBuildError};
