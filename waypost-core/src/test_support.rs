//! Deterministic doubles for the platform collaborators, used by unit and
//! behaviour tests.

use std::time::Duration;

use crate::{
    AuthorizationStatus, EtaDispatcher, EtaError, EtaEstimator, EtaRequest, EtaTicket,
    LocationSource,
};

/// `LocationSource` that only counts the commands it receives.
///
/// Status changes are delivered by the test as
/// [`LocationEvent`](crate::LocationEvent)s, mirroring how a platform reports
/// the user's answer asynchronously.
#[derive(Debug, Default, Clone)]
pub struct ScriptedLocationSource {
    status: AuthorizationStatus,
    authorization_requests: usize,
    start_requests: usize,
}

impl ScriptedLocationSource {
    /// A source whose platform already reports `status`.
    #[must_use]
    pub const fn with_status(status: AuthorizationStatus) -> Self {
        Self {
            status,
            authorization_requests: 0,
            start_requests: 0,
        }
    }

    /// How often permission was requested.
    #[must_use]
    pub const fn authorization_requests(&self) -> usize {
        self.authorization_requests
    }

    /// How often updates were started.
    #[must_use]
    pub const fn start_requests(&self) -> usize {
        self.start_requests
    }
}

impl LocationSource for ScriptedLocationSource {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_when_in_use_authorization(&mut self) {
        self.authorization_requests += 1;
    }

    fn start_updating_location(&mut self) {
        self.start_requests += 1;
    }
}

/// `EtaDispatcher` that records tickets instead of running them.
#[derive(Debug, Default, Clone)]
pub struct RecordingDispatcher {
    tickets: Vec<EtaTicket>,
}

impl RecordingDispatcher {
    /// Every ticket dispatched so far, oldest first.
    #[must_use]
    pub const fn tickets(&self) -> &[EtaTicket] {
        self.tickets.as_slice()
    }

    /// The most recent ticket.
    #[must_use]
    pub const fn last(&self) -> Option<&EtaTicket> {
        self.tickets.as_slice().last()
    }
}

impl EtaDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, ticket: EtaTicket) {
        self.tickets.push(ticket);
    }
}

/// `EtaEstimator` returning a pre-configured answer for every request.
#[derive(Debug, Clone)]
pub struct StubEtaEstimator {
    response: Result<Duration, EtaError>,
}

impl StubEtaEstimator {
    /// Answer every request with `duration`.
    #[must_use]
    pub const fn with_duration(duration: Duration) -> Self {
        Self {
            response: Ok(duration),
        }
    }

    /// Fail every request with `error`.
    #[must_use]
    pub const fn with_error(error: EtaError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl EtaEstimator for StubEtaEstimator {
    fn estimate(&self, _request: &EtaRequest) -> Result<Duration, EtaError> {
        self.response.clone()
    }
}
