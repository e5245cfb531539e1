use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// GPU power hint passed to the rendering context.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    /// Let the platform decide.
    Default,
    /// Prefer the integrated GPU.
    LowPower,
    /// Prefer the discrete GPU.
    #[default]
    HighPerformance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render Context", inline)]
#[serde(default)]
/// Preferences for the scene's rendering context.
#[allow(clippy::struct_excessive_bools)]
pub struct ContextOptions {
    /// Transparent canvas backdrop.
    pub alpha: bool,
    /// Multisample antialiasing.
    pub antialias: bool,
    /// Keep the drawing buffer after presenting (needed for screenshots).
    pub preserve_drawing_buffer: bool,
    /// Refuse to start on a software renderer.
    pub fail_if_major_performance_caveat: bool,
    /// GPU selection hint.
    #[schemars(title = "Power Preference")]
    pub power_preference: PowerPreference,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            alpha: false,
            antialias: true,
            preserve_drawing_buffer: true,
            fail_if_major_performance_caveat: false,
            power_preference: PowerPreference::HighPerformance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Scene construction switches and the initial view toggles.
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayOptions {
    /// Animation (clock) widget.
    #[schemars(title = "Animation Widget")]
    pub animation: bool,
    /// Timeline widget.
    #[schemars(title = "Timeline")]
    pub timeline: bool,
    /// Home button.
    #[schemars(skip)]
    pub home_button: bool,
    /// Place search box.
    #[schemars(skip)]
    pub geocoder: bool,
    /// Imagery layer picker.
    #[schemars(skip)]
    pub base_layer_picker: bool,
    /// 2D / 3D / Columbus view picker.
    #[schemars(skip)]
    pub scene_mode_picker: bool,
    /// Navigation help button.
    #[schemars(skip)]
    pub navigation_help_button: bool,
    /// Fullscreen button.
    #[schemars(skip)]
    pub fullscreen_button: bool,
    /// VR button.
    #[schemars(skip)]
    pub vr_button: bool,
    /// Entity info box.
    #[schemars(skip)]
    pub info_box: bool,
    /// Selection indicator.
    #[schemars(skip)]
    pub selection_indicator: bool,
    /// Shadow casting.
    #[schemars(title = "Shadows")]
    pub shadows: bool,
    /// Star sky box.
    #[schemars(title = "Sky Box")]
    pub sky_box: bool,
    /// Atmosphere halo.
    #[schemars(title = "Sky Atmosphere")]
    pub sky_atmosphere: bool,
    /// Lock the scene to 3D mode.
    #[schemars(skip)]
    pub scene_3d_only: bool,
    /// Rendering context preferences.
    #[schemars(skip)]
    pub context: ContextOptions,
    /// Orbit lines shown at startup.
    #[schemars(title = "Show Orbits")]
    pub show_orbits: bool,
    /// Ground swaths shown at startup.
    #[schemars(title = "Show Projections")]
    pub show_projections: bool,
    /// Satellite labels shown at startup.
    #[schemars(title = "Show Labels")]
    pub show_labels: bool,
    /// Side-swing angle used for the first load, in degrees.
    #[schemars(title = "Side-Swing Angle", range(min = 0.0, max = 60.0), extend("step" = 1.0))]
    pub side_swing_angle_deg: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            animation: true,
            timeline: true,
            home_button: true,
            geocoder: true,
            base_layer_picker: true,
            scene_mode_picker: true,
            navigation_help_button: true,
            fullscreen_button: true,
            vr_button: false,
            info_box: false,
            selection_indicator: false,
            shadows: false,
            sky_box: false,
            sky_atmosphere: false,
            scene_3d_only: true,
            context: ContextOptions::default(),
            show_orbits: true,
            show_projections: true,
            show_labels: true,
            side_swing_angle_deg: 20.0,
        }
    }
}
