//! Display state of the ETA field.

use std::fmt;
use std::time::Duration;

/// Text shown when no estimate could be obtained.
pub const UNAVAILABLE_LABEL: &str = "N/A";

/// Text shown while an estimate is in flight.
const PENDING_LABEL: &str = "calculating…";

/// Lifecycle of the ETA shown for the current selection.
///
/// `Empty → Pending → {Resolved | Unavailable}`. Changing the selection or
/// the transport mode starts over at `Empty` or `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EtaState {
    /// Nothing requested for the current selection.
    #[default]
    Empty,
    /// A request is in flight.
    Pending,
    /// The service answered with a duration.
    Resolved(Duration),
    /// The service failed or found no route.
    Unavailable,
}

impl EtaState {
    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the state is terminal for the current request.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Unavailable)
    }

    /// Text for the ETA line, or `None` while empty.
    #[must_use]
    pub fn label(self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Pending => Some(PENDING_LABEL.to_owned()),
            Self::Resolved(duration) => Some(format_minutes(duration)),
            Self::Unavailable => Some(UNAVAILABLE_LABEL.to_owned()),
        }
    }
}

impl fmt::Display for EtaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().unwrap_or_default())
    }
}

/// Format `duration` as whole minutes, e.g. `"7 min"`.
///
/// Rounds to the nearest minute, halves rounding up.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use waypost_core::format_minutes;
///
/// assert_eq!(format_minutes(Duration::from_secs(420)), "7 min");
/// assert_eq!(format_minutes(Duration::from_secs(89)), "1 min");
/// assert_eq!(format_minutes(Duration::from_secs(90)), "2 min");
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "durations are non-negative and far below u64::MAX minutes"
)]
pub fn format_minutes(duration: Duration) -> String {
    let minutes = (duration.as_secs_f64() / 60.0).round() as u64;
    format!("{minutes} min")
}
