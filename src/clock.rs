//! Simulated clock record shared with the scene.
//!
//! The clock covers a fixed window (`start..=stop`). While animating it
//! advances by wall-clock elapsed time scaled by `multiplier`; what happens
//! at the window edges is decided by [`ClockRange`].

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in the simulated window.
pub const WINDOW_SECONDS: f64 = 86_400.0;

/// Largest accepted speed multiplier.
pub const MAX_MULTIPLIER: f64 = 1.0e6;

/// Edge behavior of the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockRange {
    /// Passing `stop` wraps back to `start`; going before `start` clamps.
    #[default]
    LoopStop,
    /// Time is held inside `start..=stop`.
    Clamped,
    /// No limits.
    Unbounded,
}

/// Clock state: the window, the current instant and the animation flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    /// First instant of the simulated window.
    pub start: DateTime<Utc>,
    /// Last instant of the simulated window.
    pub stop: DateTime<Utc>,
    /// Current simulated instant.
    pub current: DateTime<Utc>,
    /// Simulated seconds per wall-clock second.
    pub multiplier: f64,
    /// Whether the clock advances on tick.
    pub should_animate: bool,
    /// Edge behavior.
    pub range: ClockRange,
}

impl ClockState {
    /// Paused clock over `[start, start + window_seconds]` positioned at
    /// `start`. A window reaching past the representable range ends at
    /// [`DateTime::<Utc>::MAX_UTC`].
    #[must_use]
    pub fn new(start: DateTime<Utc>, window_seconds: f64, multiplier: f64) -> Self {
        Self {
            start,
            stop: start
                .checked_add_signed(seconds(window_seconds))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            current: start,
            multiplier,
            should_animate: false,
            range: ClockRange::LoopStop,
        }
    }

    /// Length of the window in seconds.
    #[must_use]
    pub fn window_seconds(&self) -> f64 {
        seconds_between(self.start, self.stop)
    }

    /// Seconds elapsed from `start` to `current`.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        seconds_between(self.start, self.current)
    }

    /// Advance by `wall_seconds` of real time. No-op while paused.
    pub fn tick(&mut self, wall_seconds: f64) {
        if !self.should_animate {
            return;
        }
        let step = wall_seconds * self.multiplier;
        if !step.is_finite() {
            log::warn!("clock step of {step} s ignored");
            return;
        }
        match self.range {
            ClockRange::Unbounded => {
                if let Some(next) = self.current.checked_add_signed(seconds(step)) {
                    self.current = next;
                }
            }
            ClockRange::Clamped => {
                let window = self.window_seconds().max(0.0);
                let offset = (self.elapsed_seconds() + step).clamp(0.0, window);
                self.current = self.at_offset(offset);
            }
            ClockRange::LoopStop => {
                let window = self.window_seconds().max(0.0);
                let offset = self.elapsed_seconds() + step;
                let offset = if offset < 0.0 {
                    0.0
                } else if offset > window && window > 0.0 {
                    (offset - window) % window
                } else {
                    offset.min(window)
                };
                self.current = self.at_offset(offset);
            }
        }
    }

    /// Instant `offset` seconds into the window, never past `stop`.
    fn at_offset(&self, offset: f64) -> DateTime<Utc> {
        self.start
            .checked_add_signed(seconds(offset))
            .map_or(self.stop, |t| t.min(self.stop))
    }
}

/// `TimeDelta` from fractional seconds (microsecond resolution).
#[must_use]
pub fn seconds(value: f64) -> TimeDelta {
    TimeDelta::microseconds((value * 1.0e6).round() as i64)
}

/// Fractional seconds from `a` to `b`.
#[must_use]
pub fn seconds_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let delta = b - a;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1.0e3,
        |us| us as f64 / 1.0e6,
    )
}

/// Parse a user-entered timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`, offsets allowed) and the
/// offset-less forms produced by date-time pickers (`2024-01-01T08:30`,
/// `2024-01-01T08:30:15`, `2024-01-01 08:30:15`), which are read as UTC.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 3] =
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(input, fmt)
            .ok()
            .map(|naive| naive.and_utc())
    })
}
