//! Location service fed from command-line coordinates.

use log::debug;
use waypost_core::{AuthorizationStatus, LocationEvent, LocationSource, UserLocation};

use crate::{ARG_LATITUDE, ARG_LONGITUDE, CliError};

/// Stands in for a device location service.
///
/// With a fix the user counts as having granted when-in-use access; without
/// one the service behaves as if permission was denied.
#[derive(Debug, Clone, Default)]
pub(crate) struct FixedLocationSource {
    fix: Option<UserLocation>,
}

impl FixedLocationSource {
    pub(crate) const fn new(fix: Option<UserLocation>) -> Self {
        Self { fix }
    }

    /// Events a device would deliver once updates start.
    pub(crate) fn events(&self) -> Vec<LocationEvent> {
        match &self.fix {
            Some(fix) => vec![
                LocationEvent::AuthorizationChanged(AuthorizationStatus::AuthorizedWhenInUse),
                LocationEvent::Updated(fix.clone()),
            ],
            None => vec![LocationEvent::AuthorizationChanged(
                AuthorizationStatus::Denied,
            )],
        }
    }
}

impl LocationSource for FixedLocationSource {
    fn authorization_status(&self) -> AuthorizationStatus {
        if self.fix.is_some() {
            AuthorizationStatus::AuthorizedWhenInUse
        } else {
            AuthorizationStatus::Denied
        }
    }

    fn request_when_in_use_authorization(&mut self) {
        debug!("location permission requested");
    }

    fn start_updating_location(&mut self) {
        debug!("location updates started");
    }
}

/// Combine the optional coordinate flags into a reading.
///
/// Both absent means no location; exactly one present is an error.
pub(crate) fn resolve_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<UserLocation>, CliError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(CliError::IncompleteLocation {
            given: ARG_LATITUDE,
            missing: ARG_LONGITUDE,
        }),
        (None, Some(_)) => Err(CliError::IncompleteLocation {
            given: ARG_LONGITUDE,
            missing: ARG_LATITUDE,
        }),
        (Some(latitude), Some(longitude)) => {
            if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
                Ok(Some(UserLocation::new(latitude, longitude)))
            } else {
                Err(CliError::InvalidCoordinate {
                    latitude,
                    longitude,
                })
            }
        }
    }
}
