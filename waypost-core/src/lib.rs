//! Core domain types and state coordination for the Waypost POI browser.
//!
//! The crate models a single-screen browser: a fixed [`PoiCatalog`], a
//! [`LocationProvider`] wrapping the platform location service, and a
//! [`SelectionCoordinator`] that combines both with an external
//! [`EtaEstimator`] to show distance and travel time for the selected POI.
//!
//! Nothing here performs I/O. Platform services are reached through the
//! [`LocationSource`], [`EtaEstimator`] and [`EtaDispatcher`] traits.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod coordinator;
pub mod distance;
pub mod eta;
pub mod location;
pub mod observe;
mod poi;
#[doc(hidden)]
pub mod test_support;
mod transport;

pub use catalog::{ALL_CATEGORIES, CatalogError, PoiCatalog};
pub use coordinator::{
    CoordinatorConfig, DetailPanel, MapCamera, MapRegion, MapView, Marker,
    NO_LOCATION_PLACEHOLDER, SelectionCoordinator, SelectionError, SelectionState,
};
pub use distance::{distance_km, distance_m};
pub use eta::{
    EtaCompletion, EtaDispatcher, EtaError, EtaEstimator, EtaRequest, EtaState, EtaTicket,
    RequestToken, ThreadDispatcher, UNAVAILABLE_LABEL, format_minutes,
};
pub use location::{
    AuthorizationStatus, LocationEvent, LocationProvider, LocationSource, UserLocation,
};
pub use observe::{Observers, SubscriptionId};
pub use poi::{PoiId, PointOfInterest};
pub use transport::{ParseTransportModeError, TransportMode};
