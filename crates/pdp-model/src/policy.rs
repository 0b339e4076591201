//! Time-window admissibility policies.

use pdp_core::TimeWindow;

/// Decides whether a pickup or delivery starting at `time` and lasting
/// `duration` is acceptable for a parcel with window `window`.
pub trait TimeWindowPolicy: Send + Sync {
    fn can_pickup(&self, window: &TimeWindow, time: u64, duration: u64) -> bool;

    fn can_deliver(&self, window: &TimeWindow, time: u64, duration: u64) -> bool;
}

/// The built-in policies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeWindowPolicies {
    /// Every time is acceptable.
    Liberal,
    /// Only times inside the window.
    Strict,
    /// Any time at or after the window begins.  Early is never allowed.
    #[default]
    TardyAllowed,
}

impl TimeWindowPolicies {
    fn admits(self, window: &TimeWindow, time: u64) -> bool {
        match self {
            TimeWindowPolicies::Liberal      => true,
            TimeWindowPolicies::Strict       => window.is_in(time),
            TimeWindowPolicies::TardyAllowed => window.is_after_start(time),
        }
    }
}

impl TimeWindowPolicy for TimeWindowPolicies {
    fn can_pickup(&self, window: &TimeWindow, time: u64, _duration: u64) -> bool {
        self.admits(window, time)
    }

    fn can_deliver(&self, window: &TimeWindow, time: u64, _duration: u64) -> bool {
        self.admits(window, time)
    }
}
