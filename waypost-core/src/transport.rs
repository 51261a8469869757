use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How the user intends to travel to the selected POI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// By car.
    #[default]
    Driving,
    /// On foot.
    Walking,
    /// By public transit.
    Transit,
}

impl TransportMode {
    /// Every mode in picker order.
    pub const ALL: [Self; 3] = [Self::Driving, Self::Walking, Self::Transit];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::Walking => "Walking",
            Self::Transit => "Transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown [`TransportMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transport mode {0:?} (expected driving, walking or transit)")]
pub struct ParseTransportModeError(pub String);

impl FromStr for TransportMode {
    type Err = ParseTransportModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTransportModeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_driving() {
        assert_eq!(TransportMode::default(), TransportMode::Driving);
    }

    #[rstest]
    #[case("Driving", TransportMode::Driving)]
    #[case("walking", TransportMode::Walking)]
    #[case(" TRANSIT ", TransportMode::Transit)]
    fn parses_labels_ignoring_case(#[case] input: &str, #[case] expected: TransportMode) {
        assert_eq!(input.parse::<TransportMode>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_labels() {
        let err = "cycling"
            .parse::<TransportMode>()
            .expect_err("cycling is not a mode");
        assert_eq!(err, ParseTransportModeError("cycling".to_owned()));
    }

    #[rstest]
    fn labels_round_trip_through_display() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.to_string().parse::<TransportMode>(), Ok(mode));
        }
    }
}
