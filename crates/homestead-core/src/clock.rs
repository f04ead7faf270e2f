//! Simulated day/night clock.
//!
//! The clock measures time inside the current day in milliseconds and counts
//! whole days starting at day 1. Frame time is handed to the clock in
//! segments that never cross a day boundary, so evaporation up to midnight
//! is applied before the rollover and the remainder after it.
//!
//! The clock only tracks time. Growth, tax and game-over checks belong to
//! the day cycle in [`crate::tick`].

use homestead_types::ClockState;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u32::MAX")]
    DayOverflow,

    /// Invalid time configuration (e.g. zero-length days).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// A slice of frame time that stays within one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySegment {
    /// Milliseconds consumed by this segment.
    pub elapsed_ms: f64,
    /// The same span as a fraction of a full day.
    pub day_fraction: f64,
    /// Whether the segment reaches the end of the day.
    pub ends_day: bool,
}

/// The simulation clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    /// Current day, starting at 1.
    day: u32,
    /// Milliseconds elapsed in the current day.
    ms_into_day: f64,
    /// Length of one day in milliseconds.
    day_duration_ms: f64,
    /// Whether ticks are currently ignored.
    paused: bool,
}

impl SimClock {
    /// Create a clock at the start of day 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `day_duration_ms` is zero.
    pub fn new(day_duration_ms: u32) -> Result<Self, ClockError> {
        if day_duration_ms == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "day_duration_ms must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            day: 1,
            ms_into_day: 0.0,
            day_duration_ms: f64::from(day_duration_ms),
            paused: false,
        })
    }

    /// The current day number.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Milliseconds elapsed in the current day.
    pub const fn ms_into_day(&self) -> f64 {
        self.ms_into_day
    }

    /// Length of one day in milliseconds.
    pub const fn day_duration_ms(&self) -> f64 {
        self.day_duration_ms
    }

    /// Whether the clock is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume the clock.
    pub const fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Fraction of the current day that has elapsed, in `[0, 1]`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn day_progress(&self) -> f64 {
        (self.ms_into_day / self.day_duration_ms).clamp(0.0, 1.0)
    }

    /// Consume up to `budget_ms` of frame time without crossing midnight.
    ///
    /// When the budget reaches the end of the day the segment is cut there
    /// and `ends_day` is set; the caller must then [`roll_over`] before
    /// taking the next segment.
    ///
    /// [`roll_over`]: SimClock::roll_over
    #[allow(clippy::arithmetic_side_effects)]
    pub fn take_segment(&mut self, budget_ms: f64) -> DaySegment {
        let budget = budget_ms.max(0.0);
        let left = (self.day_duration_ms - self.ms_into_day).max(0.0);

        if budget >= left {
            self.ms_into_day = self.day_duration_ms;
            DaySegment {
                elapsed_ms: left,
                day_fraction: left / self.day_duration_ms,
                ends_day: true,
            }
        } else {
            self.ms_into_day += budget;
            DaySegment {
                elapsed_ms: budget,
                day_fraction: budget / self.day_duration_ms,
                ends_day: false,
            }
        }
    }

    /// Start the next day. Returns the new day number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the day counter is exhausted;
    /// the clock is left unchanged.
    pub fn roll_over(&mut self) -> Result<u32, ClockError> {
        let next = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        self.day = next;
        self.ms_into_day = 0.0;
        Ok(next)
    }

    /// Serializable view of the clock.
    pub const fn state(&self) -> ClockState {
        ClockState {
            day: self.day,
            ms_into_day: self.ms_into_day,
            day_duration_ms: self.day_duration_ms,
            paused: self.paused,
        }
    }
}
