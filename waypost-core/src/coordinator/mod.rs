//! Selection state store tying location, catalogue and ETA together.
//!
//! [`SelectionCoordinator`] owns the [`SelectionState`] and is the only way
//! to change it. It runs on a single logical thread: callers feed it user
//! input, [`LocationEvent`]s and [`EtaCompletion`]s in arrival order.
//!
//! Every ETA request advances a [`RequestToken`]. A completion is applied
//! only while its token is still current, so a slow answer for an older
//! selection or mode never overwrites a newer one. Superseded requests are
//! not cancelled; their answers are dropped on arrival.

mod config;
mod view;

use geo::Coord;
use log::{debug, warn};
use thiserror::Error;

use crate::distance::{distance_km, distance_m};
use crate::eta::{EtaCompletion, EtaDispatcher, EtaRequest, EtaState, EtaTicket, RequestToken};
use crate::location::{LocationEvent, LocationProvider, LocationSource, UserLocation};
use crate::observe::{Observers, SubscriptionId};
use crate::{ALL_CATEGORIES, PoiCatalog, PoiId, PointOfInterest, TransportMode};

pub use config::{CoordinatorConfig, DEFAULT_REGION, MapRegion};
pub use view::{DetailPanel, MapCamera, MapView, Marker, NO_LOCATION_PLACEHOLDER};

/// Errors returned by [`SelectionCoordinator`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The id does not belong to the catalogue.
    #[error("no point of interest with id {0}")]
    UnknownPoi(PoiId),
    /// The operation needs a selected POI.
    #[error("no point of interest is selected")]
    NothingSelected,
}

/// User-facing selection and filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// The selected POI, if any.
    pub selected: Option<PointOfInterest>,
    /// Chosen travel mode.
    pub transport_mode: TransportMode,
    /// Estimate for the selected POI.
    pub eta: EtaState,
    /// Search text applied to POI names.
    pub search_query: String,
    /// Category filter, [`ALL_CATEGORIES`] for no filter.
    pub selected_category: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: None,
            transport_mode: TransportMode::default(),
            eta: EtaState::Empty,
            search_query: String::new(),
            selected_category: ALL_CATEGORIES.to_owned(),
        }
    }
}

/// Reactive state store for the POI browser.
#[derive(Debug)]
pub struct SelectionCoordinator<S, D> {
    catalog: PoiCatalog,
    location: LocationProvider<S>,
    dispatcher: D,
    config: CoordinatorConfig,
    state: SelectionState,
    camera: MapCamera,
    token: RequestToken,
    request_origin: Option<Coord<f64>>,
    observers: Observers<SelectionState>,
}

impl<S, D> SelectionCoordinator<S, D>
where
    S: LocationSource,
    D: EtaDispatcher,
{
    /// Assemble a coordinator. Call [`Self::start`] to begin tracking.
    pub fn new(
        catalog: PoiCatalog,
        location: LocationProvider<S>,
        dispatcher: D,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            catalog,
            location,
            dispatcher,
            camera: MapCamera {
                region: config.initial_region,
                follows_user: true,
            },
            config,
            state: SelectionState::default(),
            token: RequestToken::default(),
            request_origin: None,
            observers: Observers::new(),
        }
    }

    /// Ask for location permission and start receiving updates.
    pub fn start(&mut self) {
        self.location.start();
    }

    /// Current selection and filter state.
    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The catalogue being browsed.
    #[must_use]
    pub const fn catalog(&self) -> &PoiCatalog {
        &self.catalog
    }

    /// The wrapped location provider.
    #[must_use]
    pub const fn location_provider(&self) -> &LocationProvider<S> {
        &self.location
    }

    /// Latest user location, if any.
    #[must_use]
    pub const fn current_location(&self) -> Option<&UserLocation> {
        self.location.current_location()
    }

    /// The dispatcher receiving ETA tickets.
    #[must_use]
    pub const fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Current map camera.
    #[must_use]
    pub const fn camera(&self) -> &MapCamera {
        &self.camera
    }

    /// Token of the most recent request epoch.
    #[must_use]
    pub const fn current_token(&self) -> RequestToken {
        self.token
    }

    /// Apply a platform location event.
    ///
    /// A new reading recentres a following camera and may refresh the
    /// estimate for the current selection.
    pub fn handle_location_event(&mut self, event: LocationEvent) {
        let is_reading = matches!(event, LocationEvent::Updated(_));
        self.location.handle(event);
        if is_reading {
            if let Some(here) = self.location.current_location().map(|reading| reading.location) {
                if self.camera.follows_user {
                    self.camera.region = MapRegion::new(here, self.config.follow_span_degrees);
                }
                self.refresh_after_move(here);
            }
        }
        self.notify();
    }

    /// Select a POI by id, or clear the selection with `None`.
    ///
    /// Starts a new estimate when a POI is selected and a location is known.
    pub fn select_poi(&mut self, id: Option<PoiId>) -> Result<(), SelectionError> {
        let selected = match id {
            Some(id) => Some(
                self.catalog
                    .get(id)
                    .cloned()
                    .ok_or(SelectionError::UnknownPoi(id))?,
            ),
            None => None,
        };
        self.state.selected = selected;
        self.restart_eta();
        self.notify();
        Ok(())
    }

    /// Clear the selection.
    pub fn dismiss(&mut self) {
        self.state.selected = None;
        self.restart_eta();
        self.notify();
    }

    /// Change the travel mode, re-estimating for the selected POI.
    ///
    /// Choosing the mode that is already active changes nothing.
    pub fn set_transport_mode(&mut self, mode: TransportMode) {
        if self.state.transport_mode == mode {
            return;
        }
        self.state.transport_mode = mode;
        if self.state.selected.is_some() {
            self.restart_eta();
        }
        self.notify();
    }

    /// Update the name filter.
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.state.search_query = text.into();
        self.notify();
    }

    /// Update the category filter.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.state.selected_category = category.into();
        self.notify();
    }

    /// Frame the selected POI and request a fresh estimate.
    pub fn center_on_selected(&mut self) -> Result<(), SelectionError> {
        let center = self
            .state
            .selected
            .as_ref()
            .map(|poi| poi.location)
            .ok_or(SelectionError::NothingSelected)?;
        self.camera = MapCamera {
            region: MapRegion::new(center, self.config.focus_span_degrees),
            follows_user: false,
        };
        self.restart_eta();
        self.notify();
        Ok(())
    }

    /// Resume following the user, recentring immediately when possible.
    pub fn follow_user(&mut self) {
        self.camera.follows_user = true;
        if let Some(here) = self.location.current_location().map(|reading| reading.location) {
            self.camera.region = MapRegion::new(here, self.config.follow_span_degrees);
        }
        self.notify();
    }

    /// Apply an estimator answer. Returns `false` for stale completions,
    /// which leave the state untouched.
    pub fn complete_eta(&mut self, completion: EtaCompletion) -> bool {
        if completion.token != self.token || self.state.selected.is_none() {
            debug!(
                "discarding stale ETA completion {} (current {})",
                completion.token, self.token
            );
            return false;
        }
        self.state.eta = match completion.outcome {
            Ok(duration) => EtaState::Resolved(duration),
            Err(err) => {
                warn!("ETA lookup {} failed: {err}", completion.token);
                EtaState::Unavailable
            }
        };
        self.notify();
        true
    }

    /// Categories for the picker, wildcard first.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// POIs passing the current search and category filters.
    #[must_use]
    pub fn visible_pois(&self) -> Vec<&PointOfInterest> {
        self.catalog
            .filter(&self.state.search_query, &self.state.selected_category)
    }

    /// Distance to the selected POI in kilometres, two decimals.
    ///
    /// Computed on every call from the latest reading.
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        let here = self.location.current_location()?;
        let poi = self.state.selected.as_ref()?;
        Some(distance_km(here.location, poi.location))
    }

    /// Detail panel for the selection, if any.
    #[must_use]
    pub fn detail_panel(&self) -> Option<DetailPanel> {
        let poi = self.state.selected.clone()?;
        Some(DetailPanel {
            poi,
            distance_km: self.distance_km(),
            transport_mode: self.state.transport_mode,
            eta: self.state.eta,
        })
    }

    /// What the map area shows right now.
    #[must_use]
    pub fn map_view(&self) -> MapView {
        let Some(here) = self.location.current_location() else {
            return MapView::Placeholder;
        };
        let selected = self.state.selected.as_ref().map(|poi| poi.id);
        let markers = self
            .visible_pois()
            .into_iter()
            .map(|poi| Marker {
                id: poi.id,
                title: poi.name.clone(),
                location: poi.location,
                selected: Some(poi.id) == selected,
            })
            .collect();
        MapView::Map {
            camera: self.camera,
            user: here.location,
            markers,
        }
    }

    /// Register a callback invoked with the state after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SelectionState) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Remove a callback registered with [`Self::subscribe`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Start a new request epoch for the current selection and mode.
    ///
    /// Without a selection or a location the estimate is left empty and no
    /// request is issued.
    fn restart_eta(&mut self) {
        self.token = self.token.next();
        self.request_origin = None;
        self.state.eta = EtaState::Empty;
        let Some(destination) = self.state.selected.as_ref().map(|poi| poi.location) else {
            return;
        };
        let Some(origin) = self.location.current_location().map(|reading| reading.location)
        else {
            debug!("no location available; skipping ETA request");
            return;
        };
        self.state.eta = EtaState::Pending;
        self.issue(origin, destination);
    }

    /// Re-estimate after the user moved far enough from the last origin.
    ///
    /// The displayed estimate stays until the new answer arrives.
    fn refresh_after_move(&mut self, here: Coord<f64>) {
        let Some(threshold) = self.config.refresh_distance_m else {
            return;
        };
        let (Some(origin), Some(destination)) = (
            self.request_origin,
            self.state.selected.as_ref().map(|poi| poi.location),
        ) else {
            return;
        };
        if distance_m(origin, here) < threshold {
            return;
        }
        self.token = self.token.next();
        self.issue(here, destination);
    }

    fn issue(&mut self, origin: Coord<f64>, destination: Coord<f64>) {
        let ticket = EtaTicket {
            token: self.token,
            request: EtaRequest {
                origin,
                destination,
                mode: self.state.transport_mode,
            },
        };
        debug!(
            "requesting {} ETA {}",
            self.state.transport_mode, ticket.token
        );
        self.request_origin = Some(origin);
        self.dispatcher.dispatch(ticket);
    }

    fn notify(&mut self) {
        self.observers.notify(&self.state);
    }
}
