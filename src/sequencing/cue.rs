#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When a cue fires, relative to the start-time offset captured at reset.
///
/// `EndMarker` is the explicit spelling of a policy the scheduler commits
/// to: the dispatch loop stops at the first cue without a finite time and
/// never advances past it. Cues after a marker are unreachable until a
/// reset-free edit removes it. A non-finite `At` value (NaN or infinity)
/// behaves exactly like `EndMarker`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueTime {
    /// Seconds from the start of playback. Non-negative and finite for a
    /// playable cue.
    At(f64),
    /// End-of-schedule sentinel: dispatch parks here for good.
    EndMarker,
}

impl CueTime {
    /// The finite fire time, if this cue has one.
    pub fn finite(self) -> Option<f64> {
        match self {
            CueTime::At(t) if t.is_finite() => Some(t),
            _ => None,
        }
    }

    /// Whether this time terminates the schedule (explicit marker or a
    /// non-finite reading).
    pub fn is_end_marker(self) -> bool {
        self.finite().is_none()
    }
}

/// A scheduled event: a fire time plus whatever payload the consumer needs.
///
/// Cues are immutable once scheduled; the scheduler reads `time` and hands
/// the whole record to the callback, never touching the payload.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Cue<T> {
    pub time: CueTime,
    pub payload: T,
}

impl<T> Cue<T> {
    /// Cue firing `secs` after the start of playback.
    pub fn at(secs: f64, payload: T) -> Self {
        Self {
            time: CueTime::At(secs),
            payload,
        }
    }

    /// End-of-schedule marker. The payload is carried but never dispatched.
    pub fn end_marker(payload: T) -> Self {
        Self {
            time: CueTime::EndMarker,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_time() {
        assert_eq!(CueTime::At(1.25).finite(), Some(1.25));
        assert_eq!(CueTime::At(0.0).finite(), Some(0.0));
        assert_eq!(CueTime::EndMarker.finite(), None);
    }

    #[test]
    fn test_non_finite_at_is_end_marker() {
        assert!(CueTime::At(f64::NAN).is_end_marker());
        assert!(CueTime::At(f64::INFINITY).is_end_marker());
        assert!(CueTime::At(f64::NEG_INFINITY).is_end_marker());
        assert!(!CueTime::At(0.5).is_end_marker());
    }

    #[test]
    fn test_cue_constructors() {
        let cue = Cue::at(0.5, "kick");
        assert_eq!(cue.time, CueTime::At(0.5));
        assert_eq!(cue.payload, "kick");

        let marker = Cue::end_marker(());
        assert!(marker.time.is_end_marker());
    }
}
