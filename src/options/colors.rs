use serde::{Deserialize, Serialize};

use crate::scene::Rgba;

const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);
const GREEN: Rgba = Rgba::rgb(0.0, 0.502, 0.0);
const YELLOW: Rgba = Rgba::rgb(1.0, 1.0, 0.0);
const ORANGE: Rgba = Rgba::rgb(1.0, 0.647, 0.0);
const PURPLE: Rgba = Rgba::rgb(0.502, 0.0, 0.502);
const CYAN: Rgba = Rgba::rgb(0.0, 1.0, 1.0);
const PINK: Rgba = Rgba::rgb(1.0, 0.753, 0.796);
const LIME: Rgba = Rgba::rgb(0.0, 1.0, 0.0);
const GOLD: Rgba = Rgba::rgb(1.0, 0.843, 0.0);
const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

/// Colors and line styling for every object the engine places.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Per-satellite colors, assigned round-robin by record index.
    pub palette: Vec<Rgba>,
    /// Alpha applied to the satellite color for its orbit line.
    pub orbit_alpha: f32,
    /// Orbit line width in pixels.
    pub orbit_width: f32,
    /// Ground swath color.
    pub swath: Rgba,
    /// Ground swath width in pixels.
    pub swath_width: f32,
    /// Outline around satellite labels.
    pub label_outline: Rgba,
    /// Label outline width in pixels.
    pub label_outline_width: f32,
    /// Query point fill.
    pub query_point: Rgba,
    /// Query point outline.
    pub query_point_outline: Rgba,
    /// Query point label text.
    pub query_label: Rgba,
    /// Fill for coverage event sub-point annotations.
    pub event_point: Rgba,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            palette: vec![
                RED, BLUE, GREEN, YELLOW, ORANGE, PURPLE, CYAN, PINK, LIME,
                GOLD,
            ],
            orbit_alpha: 0.7,
            orbit_width: 2.0,
            swath: WHITE.with_alpha(0.6),
            swath_width: 2.0,
            label_outline: BLACK,
            label_outline_width: 2.0,
            query_point: RED,
            query_point_outline: WHITE,
            query_label: YELLOW,
            event_point: CYAN,
        }
    }
}

impl ColorOptions {
    /// Satellite color for record `index`. Falls back to white when the
    /// palette is empty.
    #[must_use]
    pub fn palette_color(&self, index: usize) -> Rgba {
        if self.palette.is_empty() {
            return WHITE;
        }
        self.palette[index % self.palette.len()]
    }
}
