use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Simulated clock defaults.
pub struct PlaybackOptions {
    /// Simulated seconds per wall-clock second at startup.
    #[schemars(title = "Speed", range(min = 1.0, max = 3600.0))]
    pub multiplier: f64,
    /// Length of the simulated window in hours.
    #[schemars(skip)]
    pub window_hours: f64,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            multiplier: 60.0,
            window_hours: 24.0,
        }
    }
}

impl PlaybackOptions {
    /// Window length in seconds.
    #[must_use]
    pub fn window_seconds(&self) -> f64 {
        self.window_hours * 3600.0
    }
}
