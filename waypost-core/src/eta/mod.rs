//! Travel-time estimation to a selected point of interest.
//!
//! The [`EtaEstimator`] trait abstracts the external directions service: a
//! request names an origin, a destination and a [`TransportMode`] and the
//! estimator answers with a [`Duration`](std::time::Duration) or an
//! [`EtaError`].
//!
//! Requests are issued fire-and-forget through an [`EtaDispatcher`]. Every
//! request carries a [`RequestToken`] so that the coordinator can recognise
//! and discard completions that arrive after the selection has moved on.
//!
//! [`TransportMode`]: crate::TransportMode

mod dispatch;
mod error;
mod estimator;
mod state;

pub use dispatch::{EtaCompletion, EtaDispatcher, EtaTicket, RequestToken, ThreadDispatcher};
pub use error::EtaError;
pub use estimator::{EtaEstimator, EtaRequest};
pub use state::{EtaState, UNAVAILABLE_LABEL, format_minutes};
