use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::SampledTrack;
use crate::geo::{Geodetic, HeadingPitchRange};

/// Handle to an object owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Straight RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Opaque color from RGB.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }

    /// Alpha component.
    #[must_use]
    pub const fn alpha(self) -> f32 {
        self.0[3]
    }
}

/// Text label drawn next to an object.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    /// Label text.
    pub text: String,
    /// Fill color.
    pub fill: Rgba,
    /// Outline color.
    pub outline: Rgba,
    /// Outline width in pixels.
    pub outline_width: f32,
    /// Screen-space offset in pixels.
    pub pixel_offset: [f32; 2],
    /// Initial label visibility.
    pub show: bool,
}

/// 3D model drawn at a marker's position.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// Model resource (glTF URI).
    pub uri: String,
    /// Model scale.
    pub scale: f64,
    /// Minimum on-screen size in pixels.
    pub minimum_pixel_size: f64,
    /// Upper bound on scale.
    pub maximum_scale: f64,
    /// Tint color.
    pub color: Rgba,
    /// Mix amount between model color and tint.
    pub color_blend: f32,
}

/// Static polyline (orbit path or ground swath).
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineSpec {
    /// Display name.
    pub name: String,
    /// Vertices.
    pub positions: Vec<Geodetic>,
    /// Width in pixels.
    pub width: f32,
    /// Line color.
    pub color: Rgba,
    /// Draw on the terrain surface instead of at the vertex heights.
    pub clamp_to_ground: bool,
    /// Initial visibility.
    pub show: bool,
}

/// Moving satellite marker bound to a sampled track.
#[derive(Debug, Clone)]
pub struct MarkerSpec {
    /// Display name.
    pub name: String,
    /// Position/orientation source.
    pub track: Arc<SampledTrack>,
    /// Model drawn at the position.
    pub model: ModelSpec,
    /// Name label.
    pub label: LabelSpec,
    /// Interval in which the marker exists.
    pub availability: (DateTime<Utc>, DateTime<Utc>),
    /// Initial visibility.
    pub show: bool,
}

/// Fixed point annotation (query point, event sub-point).
#[derive(Debug, Clone, PartialEq)]
pub struct PointSpec {
    /// Display name.
    pub name: String,
    /// Location.
    pub position: Geodetic,
    /// Point size in pixels.
    pub pixel_size: f32,
    /// Fill color.
    pub color: Rgba,
    /// Outline color.
    pub outline: Rgba,
    /// Outline width in pixels.
    pub outline_width: f32,
    /// Optional label.
    pub label: Option<LabelSpec>,
}

/// Everything the engine can place into a scene.
#[derive(Debug, Clone)]
pub enum SceneObject {
    /// Static polyline.
    Polyline(PolylineSpec),
    /// Track-bound marker.
    Marker(MarkerSpec),
    /// Point annotation.
    Point(PointSpec),
}

impl SceneObject {
    /// Display name of the object.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Polyline(p) => &p.name,
            Self::Marker(m) => &m.name,
            Self::Point(p) => &p.name,
        }
    }

    /// Visibility the object is created with.
    #[must_use]
    pub fn initial_show(&self) -> bool {
        match self {
            Self::Polyline(p) => p.show,
            Self::Marker(m) => m.show,
            Self::Point(_) => true,
        }
    }

    /// Initial label visibility, if the object carries a label.
    #[must_use]
    pub fn initial_label_show(&self) -> Option<bool> {
        match self {
            Self::Polyline(_) => None,
            Self::Marker(m) => Some(m.label.show),
            Self::Point(p) => p.label.as_ref().map(|l| l.show),
        }
    }
}

/// A camera flight request.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraFlight {
    /// Fly to frame an object, optionally from a fixed offset.
    ToObject {
        /// Target object.
        id: ObjectId,
        /// Flight duration in seconds.
        duration: f64,
        /// Viewing offset from the target.
        offset: Option<HeadingPitchRange>,
    },
    /// Fly the camera to a destination.
    ToPosition {
        /// Camera destination.
        destination: Geodetic,
        /// Flight duration in seconds.
        duration: f64,
    },
}
