//! Fire-and-forget request dispatch and completion tokens.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use super::error::EtaError;
use super::estimator::{EtaEstimator, EtaRequest};

/// Monotonically increasing identifier of an ETA request.
///
/// Only the completion carrying the coordinator's current token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RequestToken(pub u64);

impl RequestToken {
    /// The token issued after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request paired with the token that identifies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaTicket {
    /// Token to echo back in the completion.
    pub token: RequestToken,
    /// What to estimate.
    pub request: EtaRequest,
}

impl EtaTicket {
    /// Build the completion for this ticket from an estimator outcome.
    #[must_use]
    pub fn complete(&self, outcome: Result<Duration, EtaError>) -> EtaCompletion {
        EtaCompletion {
            token: self.token,
            outcome,
        }
    }
}

/// Result of an ETA request, delivered back to the owning event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtaCompletion {
    /// Token of the request this answers.
    pub token: RequestToken,
    /// Estimated duration or the reason there is none.
    pub outcome: Result<Duration, EtaError>,
}

/// Hands ETA requests to whatever executes them.
///
/// Dispatch must not block and must not call back into the coordinator.
/// Completions are routed back by the event loop that owns the coordinator.
pub trait EtaDispatcher {
    /// Start working on `ticket`.
    fn dispatch(&mut self, ticket: EtaTicket);
}

/// Runs each request on its own worker thread and sends the completion down a
/// channel.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use waypost_core::{
///     EtaDispatcher, EtaError, EtaEstimator, EtaRequest, EtaTicket, RequestToken,
///     ThreadDispatcher, TransportMode,
/// };
///
/// struct Fixed;
///
/// impl EtaEstimator for Fixed {
///     fn estimate(&self, _request: &EtaRequest) -> Result<Duration, EtaError> {
///         Ok(Duration::from_secs(60))
///     }
/// }
///
/// let (mut dispatcher, completions) = ThreadDispatcher::channel(Fixed);
/// dispatcher.dispatch(EtaTicket {
///     token: RequestToken(1),
///     request: EtaRequest {
///         origin: Coord { x: 0.0, y: 0.0 },
///         destination: Coord { x: 0.1, y: 0.1 },
///         mode: TransportMode::Walking,
///     },
/// });
/// let completion = completions.recv().expect("worker replies");
/// assert_eq!(completion.token, RequestToken(1));
/// assert_eq!(completion.outcome, Ok(Duration::from_secs(60)));
/// ```
pub struct ThreadDispatcher<E> {
    estimator: Arc<E>,
    completions: Sender<EtaCompletion>,
}

impl<E> ThreadDispatcher<E>
where
    E: EtaEstimator + Send + Sync + 'static,
{
    /// Create a dispatcher sending completions to `completions`.
    pub fn new(estimator: Arc<E>, completions: Sender<EtaCompletion>) -> Self {
        Self {
            estimator,
            completions,
        }
    }

    /// Create a dispatcher together with the receiving end of its channel.
    pub fn channel(estimator: E) -> (Self, Receiver<EtaCompletion>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(Arc::new(estimator), tx), rx)
    }
}

impl<E> EtaDispatcher for ThreadDispatcher<E>
where
    E: EtaEstimator + Send + Sync + 'static,
{
    fn dispatch(&mut self, ticket: EtaTicket) {
        let estimator = Arc::clone(&self.estimator);
        let completions = self.completions.clone();
        let spawned = thread::Builder::new()
            .name(format!("waypost-eta-{}", ticket.token.0))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    estimator.estimate(&ticket.request)
                }))
                .unwrap_or_else(|_| {
                    warn!("ETA worker for {} panicked", ticket.token);
                    Err(EtaError::Dispatch {
                        message: "estimator panicked".to_owned(),
                    })
                });
                if completions.send(ticket.complete(outcome)).is_err() {
                    debug!("completion for {} dropped: receiver closed", ticket.token);
                }
            });
        if let Err(err) = spawned {
            warn!("failed to spawn ETA worker for {}: {err}", ticket.token);
            let failure = ticket.complete(Err(EtaError::Dispatch {
                message: err.to_string(),
            }));
            if self.completions.send(failure).is_err() {
                debug!("completion for {} dropped: receiver closed", ticket.token);
            }
        }
    }
}

impl<E> fmt::Debug for ThreadDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadDispatcher").finish_non_exhaustive()
    }
}
