//! Centralized display options with TOML preset support, plus the injected
//! session configuration.
//!
//! All tweakable settings (scene switches, colors, camera flights, playback,
//! marker sizing, query presentation) are consolidated in [`Options`].
//! Options serialize to/from TOML for presets; [`SessionConfig`] carries the
//! per-deployment values (access token, initial time, model, backend).

mod camera;
mod colors;
mod display;
mod markers;
mod playback;
mod query;
mod session;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use display::{ContextOptions, DisplayOptions, PowerPreference};
pub use markers::MarkerOptions;
pub use playback::PlaybackOptions;
pub use query::QueryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use session::{
    SessionConfig, ENV_ACCESS_TOKEN, ENV_BACKEND_URL, ENV_INITIAL_TIME,
    ENV_MODEL_URI,
};

use crate::error::SatVizError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Scene switches and initial view toggles.
    pub display: DisplayOptions,
    /// Satellite palette and annotation colors.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Camera flight parameters.
    pub camera: CameraOptions,
    /// Simulated clock defaults.
    pub playback: PlaybackOptions,
    /// Satellite model and label sizing.
    pub markers: MarkerOptions,
    /// Coverage query presentation.
    pub query: QueryOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Io`] if the file cannot be read, or
    /// [`SatVizError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SatVizError> {
        let content = std::fs::read_to_string(path).map_err(SatVizError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SatVizError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::OptionsParse`] if serialization fails, or
    /// [`SatVizError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SatVizError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SatVizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SatVizError::Io)?;
        }
        std::fs::write(path, content).map_err(SatVizError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
