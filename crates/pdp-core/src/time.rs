//! Simulated-time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `u64` count of time units.  A tick is
//! the half-open interval `[start, end)`; models receive it as a
//! [`TimeLapse`] and *consume* from it as they do work.  Whatever a model
//! cannot finish within the lapse it persists and resumes on a later tick.
//!
//! Using integers as the canonical unit keeps every budget comparison exact
//! (no floating-point drift).  Only the road model converts between time and
//! distance, via `time_units_per_hour`.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Number of milliseconds in one hour: the default `time_units_per_hour`.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

// ── TimeLapse ─────────────────────────────────────────────────────────────────

/// A consumable slice of simulated time `[start, end)`.
///
/// Every lapse starts with its full length available.  `consume` subtracts
/// from the budget; [`time`](Self::time) reports the instant reached so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeLapse {
    start:     u64,
    end:       u64,
    time_left: u64,
}

impl TimeLapse {
    /// Create a lapse covering `[start, end)`.
    ///
    /// # Errors
    /// [`CoreError::InvalidTimeLapse`] if `start >= end`.
    pub fn new(start: u64, end: u64) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::InvalidTimeLapse { start, end });
        }
        Ok(Self { start, end, time_left: end - start })
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn tick_length(&self) -> u64 {
        self.end - self.start
    }

    /// Budget still available in this lapse.
    #[inline]
    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    #[inline]
    pub fn has_time_left(&self) -> bool {
        self.time_left > 0
    }

    /// The current instant: `start` plus everything consumed so far.
    #[inline]
    pub fn time(&self) -> u64 {
        self.end - self.time_left
    }

    #[inline]
    pub fn time_consumed(&self) -> u64 {
        self.tick_length() - self.time_left
    }

    /// Consume `amount` units of the remaining budget.
    ///
    /// # Errors
    /// [`CoreError::InsufficientTime`] if `amount > time_left()`; the lapse
    /// is left unchanged.
    pub fn consume(&mut self, amount: u64) -> CoreResult<()> {
        if amount > self.time_left {
            return Err(CoreError::InsufficientTime { requested: amount, left: self.time_left });
        }
        self.time_left -= amount;
        Ok(())
    }

    /// Consume the whole remaining budget.
    #[inline]
    pub fn consume_all(&mut self) {
        self.time_left = 0;
    }

    /// A fresh, unconsumed lapse over the same interval.
    #[inline]
    pub fn renewed(&self) -> TimeLapse {
        TimeLapse { start: self.start, end: self.end, time_left: self.end - self.start }
    }

    /// `true` if `t` lies in `[start, end)`.
    #[inline]
    pub fn is_in(&self, t: u64) -> bool {
        t >= self.start && t < self.end
    }
}

impl fmt::Display for TimeLapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) left={}", self.start, self.end, self.time_left)
    }
}

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// A half-open interval `[begin, end)` during which an action is on time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub begin: u64,
    pub end:   u64,
}

impl TimeWindow {
    /// A window that is always open.
    pub const ALWAYS: TimeWindow = TimeWindow { begin: 0, end: u64::MAX };

    /// # Errors
    /// [`CoreError::InvalidTimeWindow`] if `end < begin`.
    pub fn new(begin: u64, end: u64) -> CoreResult<Self> {
        if end < begin {
            return Err(CoreError::InvalidTimeWindow { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// `begin <= t < end`.
    #[inline]
    pub fn is_in(&self, t: u64) -> bool {
        self.is_after_start(t) && self.is_before_end(t)
    }

    /// `t >= begin`.
    #[inline]
    pub fn is_after_start(&self, t: u64) -> bool {
        t >= self.begin
    }

    /// `t < begin`.
    #[inline]
    pub fn is_before_start(&self, t: u64) -> bool {
        t < self.begin
    }

    /// `t < end`.
    #[inline]
    pub fn is_before_end(&self, t: u64) -> bool {
        t < self.end
    }

    /// `t >= end`.
    #[inline]
    pub fn is_after_end(&self, t: u64) -> bool {
        t >= self.end
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.end - self.begin
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::ALWAYS
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and hands out the [`TimeLapse`] for it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Time of tick 0.
    pub start_time:   u64,
    /// Length of every tick in time units.
    pub tick_length:  u64,
    /// Start of the current tick: advanced by `SimClock::advance()`.
    pub current_time: u64,
}

impl SimClock {
    pub fn new(start_time: u64, tick_length: u64) -> Self {
        Self { start_time, tick_length, current_time: start_time }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_time += self.tick_length;
    }

    /// Number of ticks completed since `start_time`.
    #[inline]
    pub fn ticks_elapsed(&self) -> u64 {
        if self.tick_length == 0 {
            return 0;
        }
        (self.current_time - self.start_time) / self.tick_length
    }

    /// The lapse `[current_time, current_time + tick_length)`.
    ///
    /// # Errors
    /// [`CoreError::InvalidTimeLapse`] if `tick_length` is zero.
    pub fn lapse(&self) -> CoreResult<TimeLapse> {
        TimeLapse::new(self.current_time, self.current_time + self.tick_length)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} (tick {})", self.current_time, self.ticks_elapsed())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate (enable
/// the `serde` feature) and passed to the simulation driver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Time of tick 0.
    pub start_time: u64,

    /// Time units per tick.  Must be non-zero.
    pub tick_length: u64,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// How many time units make up one hour; speeds are expressed in
    /// distance units per hour.  Default: [`MS_PER_HOUR`].
    pub time_units_per_hour: f64,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The time at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_time(&self) -> u64 {
        self.start_time + self.total_ticks * self.tick_length
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_time, self.tick_length)
    }

    /// Reject configurations the driver cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_length == 0 {
            return Err(CoreError::Config("tick_length must be positive".into()));
        }
        if !(self.time_units_per_hour.is_finite() && self.time_units_per_hour > 0.0) {
            return Err(CoreError::Config(format!(
                "time_units_per_hour must be positive, got {}",
                self.time_units_per_hour
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    /// One-second ticks in millisecond units, one simulated hour in total.
    fn default() -> Self {
        Self {
            start_time:            0,
            tick_length:           1_000,
            total_ticks:           3_600,
            time_units_per_hour:   MS_PER_HOUR,
            output_interval_ticks: 60,
        }
    }
}
