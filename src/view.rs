//! View state: focus mode, selection and the three visibility toggles.
//!
//! [`ViewState`] is plain data. The engine mutates it through its view
//! controller methods and asks [`ViewState::visibility_for`] what each
//! satellite's objects should look like; the rule lives here so that a
//! focused-only recompute and a full recompute can never disagree.

use crate::error::SatVizError;
use crate::options::DisplayOptions;

/// Largest accepted side-swing angle in degrees.
pub const MAX_SIDE_SWING_DEG: f64 = 60.0;

/// Which satellites are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    /// Every satellite.
    #[default]
    All,
    /// Only the satellite at this record index.
    Focused(usize),
}

/// Target visibility of one satellite's objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Visibility {
    /// Satellite marker.
    pub marker: bool,
    /// Marker label.
    pub label: bool,
    /// Orbit line.
    pub orbit: bool,
    /// Left and right ground swaths.
    pub swaths: bool,
}

/// Session-wide view state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Focus mode.
    pub mode: Focus,
    /// Highlighted list entry, independent of focus.
    pub selection: Option<usize>,
    /// Orbit lines enabled.
    pub show_orbits: bool,
    /// Ground swaths enabled.
    pub show_projections: bool,
    /// Marker labels enabled.
    pub show_labels: bool,
    /// Current side-swing angle in degrees.
    pub side_swing_angle_deg: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&DisplayOptions::default())
    }
}

impl ViewState {
    /// Initial state: all satellites, toggles and angle from `display`.
    #[must_use]
    pub fn new(display: &DisplayOptions) -> Self {
        Self {
            mode: Focus::All,
            selection: None,
            show_orbits: display.show_orbits,
            show_projections: display.show_projections,
            show_labels: display.show_labels,
            side_swing_angle_deg: display.side_swing_angle_deg,
        }
    }

    /// Focused record index, if any.
    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        match self.mode {
            Focus::All => None,
            Focus::Focused(index) => Some(index),
        }
    }

    /// Visibility of satellite `index` under the current mode and toggles.
    #[must_use]
    pub fn visibility_for(&self, index: usize) -> Visibility {
        let in_view = match self.mode {
            Focus::All => true,
            Focus::Focused(focused) => focused == index,
        };
        Visibility {
            marker: in_view,
            label: self.show_labels,
            orbit: in_view && self.show_orbits,
            swaths: in_view && self.show_projections,
        }
    }

    /// Back to all satellites with no selection.
    pub fn reset_mode(&mut self) {
        self.mode = Focus::All;
        self.selection = None;
    }
}

/// Check a side-swing angle against `[0, 60]`.
///
/// # Errors
///
/// Returns [`SatVizError::Validation`] for a non-finite or out-of-range
/// angle.
pub fn validate_side_swing_angle(angle_deg: f64) -> Result<f64, SatVizError> {
    if angle_deg.is_finite() && (0.0..=MAX_SIDE_SWING_DEG).contains(&angle_deg) {
        Ok(angle_deg)
    } else {
        Err(SatVizError::Validation(format!(
            "side-swing angle must be between 0 and {MAX_SIDE_SWING_DEG} \
             degrees, got {angle_deg}"
        )))
    }
}
