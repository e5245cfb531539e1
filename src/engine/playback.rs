//! Time/playback controller.
//!
//! Owns the simulated [`ClockState`]. The engine pushes the clock to the
//! scene after every mutation, so the scene always reflects this state.

use chrono::{DateTime, Utc};
use web_time::Instant;

use super::SatVizEngine;
use crate::clock::{parse_timestamp, ClockState, MAX_MULTIPLIER};
use crate::error::SatVizError;
use crate::scene::SceneInterface;

/// Play/pause state, speed and the current instant of the simulated clock.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    clock: ClockState,
    last_tick: Option<Instant>,
}

impl PlaybackController {
    /// Controller over a paused clock.
    #[must_use]
    pub fn new(clock: ClockState) -> Self {
        Self {
            clock,
            last_tick: None,
        }
    }

    /// Current clock.
    #[must_use]
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Whether the clock is animating.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.clock.should_animate
    }

    /// Flip between playing and paused. Returns the new playing state.
    pub fn toggle_play_pause(&mut self) -> bool {
        self.clock.should_animate = !self.clock.should_animate;
        self.clock.should_animate
    }

    /// Rewind to the window start and pause.
    pub fn reset_time(&mut self) {
        self.clock.current = self.clock.start;
        self.clock.should_animate = false;
    }

    /// Set the multiplier without touching the play state.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] unless `0 < multiplier <=`
    /// [`MAX_MULTIPLIER`].
    pub fn change_speed(&mut self, multiplier: f64) -> Result<(), SatVizError> {
        if multiplier.is_nan() || multiplier <= 0.0 || multiplier > MAX_MULTIPLIER {
            return Err(SatVizError::Validation(format!(
                "speed must be in (0, {MAX_MULTIPLIER}], got {multiplier}"
            )));
        }
        self.clock.multiplier = multiplier;
        Ok(())
    }

    /// Set the current instant from user input, independent of play state.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] if `input` is not a timestamp; the
    /// clock is left unchanged.
    pub fn jump_to_time(&mut self, input: &str) -> Result<DateTime<Utc>, SatVizError> {
        let time = parse_timestamp(input).ok_or_else(|| {
            SatVizError::Validation(format!("'{input}' is not a valid time"))
        })?;
        self.clock.current = time;
        Ok(time)
    }

    /// Follow the wall clock: current instant `now`, multiplier 1.
    pub fn enable_real_time(&mut self, now: DateTime<Utc>) {
        self.clock.current = now;
        self.clock.multiplier = 1.0;
    }

    /// Advance by the wall time since the previous tick. Returns whether the
    /// simulated time moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f64());
        self.last_tick = Some(now);
        match elapsed {
            Some(dt) if self.clock.should_animate && dt > 0.0 => {
                self.clock.tick(dt);
                true
            }
            _ => false,
        }
    }
}

impl<S: SceneInterface> SatVizEngine<S> {
    /// Start or pause the simulated clock. Returns the new playing state.
    pub fn toggle_play_pause(&mut self) -> bool {
        let playing = self.playback.toggle_play_pause();
        log::debug!("playback {}", if playing { "started" } else { "paused" });
        self.sync_clock();
        playing
    }

    /// Rewind to the window start; pauses if playing.
    pub fn reset_time(&mut self) {
        self.playback.reset_time();
        self.sync_clock();
    }

    /// Set the clock multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] for a multiplier that is not in
    /// `(0, MAX_MULTIPLIER]`.
    pub fn change_speed(&mut self, multiplier: f64) -> Result<(), SatVizError> {
        self.playback.change_speed(multiplier)?;
        log::debug!("clock speed set to {multiplier}x");
        self.sync_clock();
        Ok(())
    }

    /// Jump to a user-entered timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] for an unparseable timestamp; the
    /// clock is left unchanged.
    pub fn jump_to_time(&mut self, input: &str) -> Result<(), SatVizError> {
        let time = self.playback.jump_to_time(input)?;
        log::debug!("jumped to {time}");
        self.sync_clock();
        Ok(())
    }

    /// Follow the wall clock at 1x.
    pub fn enable_real_time(&mut self, now: DateTime<Utc>) {
        self.playback.enable_real_time(now);
        self.sync_clock();
    }

    /// Advance the simulated clock to wall time `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.playback.tick(now) {
            self.sync_clock();
        }
    }

    /// Current simulated clock.
    #[must_use]
    pub fn clock(&self) -> &ClockState {
        self.playback.clock()
    }

    fn sync_clock(&mut self) {
        self.scene.set_clock(self.playback.clock().clone());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::WINDOW_SECONDS;

    fn t0() -> DateTime<Utc> {
        parse_timestamp("2024-01-01T00:00:00Z").unwrap()
    }

    fn controller() -> PlaybackController {
        PlaybackController::new(ClockState::new(t0(), WINDOW_SECONDS, 60.0))
    }

    #[test]
    fn starts_paused_and_toggles() {
        let mut p = controller();
        assert!(!p.is_playing());
        assert!(p.toggle_play_pause());
        assert!(!p.toggle_play_pause());
    }

    #[test]
    fn reset_rewinds_and_pauses() {
        let mut p = controller();
        let _ = p.toggle_play_pause();
        let _ = p.jump_to_time("2024-01-01T05:00:00Z").unwrap();
        p.reset_time();
        assert_eq!(p.clock().current, t0());
        assert!(!p.is_playing());
    }

    #[test]
    fn speed_change_keeps_play_state() {
        let mut p = controller();
        let _ = p.toggle_play_pause();
        p.change_speed(600.0).unwrap();
        assert!(p.is_playing());
        assert_eq!(p.clock().multiplier, 600.0);
        assert!(p.change_speed(f64::NAN).unwrap_err().is_validation());
        assert!(p.change_speed(0.0).is_err());
        assert!(p.change_speed(1.0e300).unwrap_err().is_validation());
        assert!(p.change_speed(f64::INFINITY).is_err());
        assert_eq!(p.clock().multiplier, 600.0);
        p.change_speed(MAX_MULTIPLIER).unwrap();
    }

    #[test]
    fn bad_jump_leaves_clock_untouched() {
        let mut p = controller();
        let before = p.clock().clone();
        assert!(p.jump_to_time("not-a-date").unwrap_err().is_validation());
        assert_eq!(p.clock(), &before);
    }

    #[test]
    fn jump_sets_exact_instant() {
        let mut p = controller();
        let target = parse_timestamp("2024-01-01T12:34:56Z").unwrap();
        let _ = p.jump_to_time("2024-01-01T12:34:56Z").unwrap();
        assert_eq!(p.clock().current, target);
    }

    #[test]
    fn real_time_runs_at_one_x() {
        let mut p = controller();
        let now = parse_timestamp("2024-01-01T09:00:00Z").unwrap();
        p.enable_real_time(now);
        assert_eq!(p.clock().current, now);
        assert_eq!(p.clock().multiplier, 1.0);
    }

    #[test]
    fn tick_advances_only_while_playing() {
        let mut p = controller();
        let start = Instant::now();
        assert!(!p.tick(start));
        assert!(!p.tick(start + Duration::from_secs(1)));
        assert_eq!(p.clock().current, t0());

        let _ = p.toggle_play_pause();
        assert!(p.tick(start + Duration::from_secs(3)));
        // 2 s of wall time at 60x.
        assert_eq!(p.clock().elapsed_seconds(), 120.0);
    }

    #[test]
    fn fastest_speed_keeps_the_clock_in_its_window() {
        let mut engine = super::super::tests::engine();
        assert!(engine.change_speed(1.0e300).is_err());
        engine.change_speed(MAX_MULTIPLIER).unwrap();
        assert!(engine.toggle_play_pause());

        let start = Instant::now();
        engine.tick(start);
        for hours in 1..=3 {
            engine.tick(start + Duration::from_secs(hours * 3600));
            let clock = engine.clock();
            assert!(clock.current >= clock.start && clock.current <= clock.stop);
        }
        assert_eq!(engine.scene().clock(), engine.clock());
    }
}
