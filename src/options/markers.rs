use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Markers", inline)]
#[serde(default)]
/// Satellite model and label sizing.
pub struct MarkerOptions {
    /// Model scale factor.
    #[schemars(skip)]
    pub model_scale: f64,
    /// Smallest on-screen model size in pixels.
    #[schemars(title = "Minimum Pixel Size", range(min = 1.0, max = 256.0), extend("step" = 1.0))]
    pub minimum_pixel_size: f64,
    /// Cap on the model scale.
    #[schemars(skip)]
    pub maximum_scale: f64,
    /// Mix between model texture and satellite color.
    #[schemars(title = "Color Blend", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub color_blend: f32,
    /// Label offset from the model in pixels.
    #[schemars(skip)]
    pub label_offset: [f32; 2],
    /// Query point size in pixels.
    #[schemars(skip)]
    pub query_point_size: f32,
    /// Query point label offset in pixels.
    #[schemars(skip)]
    pub query_label_offset: [f32; 2],
    /// Coverage event sub-point size in pixels.
    #[schemars(skip)]
    pub event_point_size: f32,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            model_scale: 100_000.0,
            minimum_pixel_size: 32.0,
            maximum_scale: 200_000.0,
            color_blend: 0.5,
            label_offset: [0.0, -30.0],
            query_point_size: 10.0,
            query_label_offset: [0.0, 30.0],
            event_point_size: 6.0,
        }
    }
}
