//! Estimator trait and request type.

use std::time::Duration;

use geo::Coord;

use crate::TransportMode;

use super::error::EtaError;

/// One travel-time question for the directions service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaRequest {
    /// Start position, `x = longitude`, `y = latitude`.
    pub origin: Coord<f64>,
    /// End position, `x = longitude`, `y = latitude`.
    pub destination: Coord<f64>,
    /// Travel mode to route with.
    pub mode: TransportMode,
}

/// Estimate how long a trip takes.
///
/// Implementations may block; callers run them off the UI thread through an
/// [`EtaDispatcher`](super::EtaDispatcher).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use waypost_core::{EtaError, EtaEstimator, EtaRequest, TransportMode};
///
/// struct Fixed;
///
/// impl EtaEstimator for Fixed {
///     fn estimate(&self, request: &EtaRequest) -> Result<Duration, EtaError> {
///         match request.mode {
///             TransportMode::Transit => Err(EtaError::UnsupportedMode(request.mode)),
///             _ => Ok(Duration::from_secs(420)),
///         }
///     }
/// }
///
/// let request = EtaRequest {
///     origin: Coord { x: -79.3806, y: 43.6452 },
///     destination: Coord { x: -79.3871, y: 43.6426 },
///     mode: TransportMode::Driving,
/// };
/// assert_eq!(Fixed.estimate(&request)?, Duration::from_secs(420));
/// # Ok::<(), EtaError>(())
/// ```
pub trait EtaEstimator {
    /// Return the expected travel time for `request`.
    fn estimate(&self, request: &EtaRequest) -> Result<Duration, EtaError>;
}

impl<E> EtaEstimator for Box<E>
where
    E: EtaEstimator + ?Sized,
{
    fn estimate(&self, request: &EtaRequest) -> Result<Duration, EtaError> {
        (**self).estimate(request)
    }
}
