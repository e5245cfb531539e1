//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from the satellite list, a
//! toolbar button, the query form or a script, is represented as a
//! `SatVizCommand`. Consumers construct commands and pass them to
//! [`SatVizEngine::execute`](super::SatVizEngine::execute).

/// A user-level operation on the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SatVizCommand {
    // ── View ────────────────────────────────────────────────────────────
    /// Show only this satellite and fly to it.
    FocusOn(usize),
    /// Highlight a list entry without changing visibility.
    Select(usize),
    /// Leave focus mode.
    ShowAll,
    /// Leave focus mode and fly to the home view.
    ResetView,
    /// Flip orbit line visibility.
    ToggleOrbits,
    /// Flip ground swath visibility.
    ToggleProjections,
    /// Flip marker label visibility.
    ToggleLabels,
    /// Change the side-swing angle and reload the dataset.
    SetSideSwingAngle(f64),
    /// Reload the dataset at the current angle.
    Reload,

    // ── Playback ────────────────────────────────────────────────────────
    /// Start or pause the simulated clock.
    TogglePlayPause,
    /// Rewind to the window start and pause.
    ResetTime,
    /// Set the clock multiplier.
    ChangeSpeed(f64),
    /// Jump to a user-entered timestamp.
    JumpToTime(String),
    /// Follow the wall clock at 1x.
    EnableRealTime,

    // ── Coverage query ──────────────────────────────────────────────────
    /// Query revisit statistics for a ground point.
    QueryCoverage {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// Fly to a listed coverage event.
    ActivateResult(usize),
}
