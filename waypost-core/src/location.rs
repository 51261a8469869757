//! User location tracking on top of a platform location service.
//!
//! The platform side is abstracted by [`LocationSource`]: it reports the
//! authorization status and accepts "request permission" and "start updating"
//! commands. Readings and status changes are pushed back in by the host as
//! [`LocationEvent`]s via [`LocationProvider::handle`], which stores the
//! latest reading and fans the event out to subscribers.
//!
//! Permission denial is not an error. It is a terminal state in which
//! [`LocationProvider::current_location`] stays `None`.

use std::time::SystemTime;

use geo::Coord;
use log::{debug, info};

use crate::observe::{Observers, SubscriptionId};

/// A single position reading. Each reading replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserLocation {
    /// WGS84 position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Horizontal accuracy radius in metres, when reported.
    pub horizontal_accuracy: Option<f64>,
    /// When the reading was taken, when reported.
    pub timestamp: Option<SystemTime>,
}

impl UserLocation {
    /// A reading with only a position.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            location: Coord {
                x: longitude,
                y: latitude,
            },
            horizontal_accuracy: None,
            timestamp: None,
        }
    }

    /// Attach an accuracy radius in metres.
    #[must_use]
    pub fn with_accuracy(mut self, metres: f64) -> Self {
        self.horizontal_accuracy = Some(metres);
        self
    }

    /// Attach a timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Location permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// Access is blocked by policy.
    Restricted,
    /// The user refused access.
    Denied,
    /// Access granted while the app is in use.
    AuthorizedWhenInUse,
    /// Access granted at all times.
    AuthorizedAlways,
}

impl AuthorizationStatus {
    /// Whether readings may be delivered under this status.
    #[must_use]
    pub const fn permits_updates(self) -> bool {
        matches!(self, Self::AuthorizedWhenInUse | Self::AuthorizedAlways)
    }

    /// Whether the user or policy has refused access.
    #[must_use]
    pub const fn is_denied(self) -> bool {
        matches!(self, Self::Denied | Self::Restricted)
    }
}

/// Notifications pushed by the platform and re-emitted to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// A new position reading arrived.
    Updated(UserLocation),
    /// The authorization status changed.
    AuthorizationChanged(AuthorizationStatus),
}

/// Commands understood by the platform location service.
pub trait LocationSource {
    /// Current authorization status.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for when-in-use permission. May show an OS prompt.
    fn request_when_in_use_authorization(&mut self);

    /// Begin delivering continuous position updates.
    fn start_updating_location(&mut self);
}

/// Holds the latest reading and authorization status for one location source.
#[derive(Debug)]
pub struct LocationProvider<S> {
    source: S,
    status: AuthorizationStatus,
    last: Option<UserLocation>,
    started: bool,
    observers: Observers<LocationEvent>,
}

impl<S: LocationSource> LocationProvider<S> {
    /// Wrap `source`. Nothing is requested until [`Self::start`].
    pub fn new(source: S) -> Self {
        let status = source.authorization_status();
        Self {
            source,
            status,
            last: None,
            started: false,
            observers: Observers::new(),
        }
    }

    /// Request permission if undecided and begin updates. Later calls do
    /// nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.status = self.source.authorization_status();
        if self.status == AuthorizationStatus::NotDetermined {
            debug!("requesting when-in-use location authorization");
            self.source.request_when_in_use_authorization();
        }
        self.source.start_updating_location();
    }

    /// Whether [`Self::start`] has been called.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Most recent reading, or `None` before the first fix or after denial.
    #[must_use]
    pub const fn current_location(&self) -> Option<&UserLocation> {
        self.last.as_ref()
    }

    /// Last known authorization status.
    #[must_use]
    pub const fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    /// Borrow the underlying platform source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Apply a platform event and notify subscribers.
    ///
    /// Readings delivered while access is denied are dropped.
    pub fn handle(&mut self, event: LocationEvent) {
        match &event {
            LocationEvent::Updated(reading) => {
                if self.status.is_denied() {
                    debug!("dropping location reading received while access is denied");
                    return;
                }
                self.last = Some(reading.clone());
            }
            LocationEvent::AuthorizationChanged(status) => {
                info!("location authorization changed to {status:?}");
                self.status = *status;
                if status.is_denied() {
                    self.last = None;
                }
            }
        }
        self.observers.notify(&event);
    }

    /// Register a callback for every applied [`LocationEvent`].
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&LocationEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Remove a callback registered with [`Self::subscribe`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
