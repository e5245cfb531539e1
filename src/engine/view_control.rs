//! View controller: focus mode, selection and the visibility toggles.
//!
//! Every method mutates [`ViewState`](crate::view::ViewState) first and then
//! pushes the resulting visibility to the scene through `apply`, which
//! reads the rule from `ViewState::visibility_for`.

use super::SatVizEngine;
use crate::entity::SatelliteVisual;
use crate::error::SatVizError;
use crate::scene::{ObjectId, SceneInterface};
use crate::view::{Focus, ViewState};

/// Which objects of a satellite a refresh touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    All,
    Orbit,
    Swaths,
    Labels,
}

fn apply<S: SceneInterface>(
    scene: &mut S,
    view: &ViewState,
    index: usize,
    visual: &SatelliteVisual,
    part: Part,
) {
    let visibility = view.visibility_for(index);
    if matches!(part, Part::All) {
        show(scene, visual.marker, visibility.marker);
    }
    if matches!(part, Part::All | Part::Orbit) {
        show(scene, visual.orbit, visibility.orbit);
    }
    if matches!(part, Part::All | Part::Swaths) {
        for id in visual.swaths() {
            show(scene, id, visibility.swaths);
        }
    }
    if matches!(part, Part::All | Part::Labels) {
        if let Err(e) = scene.set_label_visible(visual.marker, visibility.label) {
            log::warn!("label of object #{}: {e}", visual.marker.0);
        }
    }
}

fn show<S: SceneInterface>(scene: &mut S, id: ObjectId, visible: bool) {
    if let Err(e) = scene.set_visible(id, visible) {
        log::warn!("object #{}: {e}", id.0);
    }
}

impl<S: SceneInterface> SatVizEngine<S> {
    /// Recompute `part` for one satellite (`Some(index)`) or all of them.
    fn refresh(&mut self, scope: Option<usize>, part: Part) {
        let targets = self
            .registry
            .visuals()
            .filter(|(index, _)| scope.is_none_or(|only| only == *index));
        for (index, visual) in targets {
            apply(&mut self.scene, &self.view, index, visual, part);
        }
    }

    /// Show only satellite `index` and fly the camera to it.
    ///
    /// Repeating the call with the same index reapplies the same visibility.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] if `index` is out of range or names
    /// a placeholder; nothing changes in that case.
    pub fn focus_on(&mut self, index: usize) -> Result<(), SatVizError> {
        let entry = self.registry.get(index).ok_or_else(|| {
            SatVizError::Validation(format!(
                "no satellite at position {index} ({} loaded)",
                self.registry.len()
            ))
        })?;
        let marker = entry.visual.map(|visual| visual.marker).ok_or_else(|| {
            SatVizError::Validation(format!(
                "satellite '{}' has no valid trajectory",
                entry.name
            ))
        })?;

        self.view.selection = Some(index);
        self.view.mode = Focus::Focused(index);
        self.refresh(None, Part::All);
        log::debug!("focused satellite {index}");

        let camera = &self.options.camera;
        self.scene
            .fly_to(marker, camera.focus_duration, Some(camera.focus_offset()))?;
        Ok(())
    }

    /// Highlight list entry `index` without changing what is shown.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] if `index` is out of range.
    pub fn select(&mut self, index: usize) -> Result<(), SatVizError> {
        if index >= self.registry.len() {
            return Err(SatVizError::Validation(format!(
                "no satellite at position {index} ({} loaded)",
                self.registry.len()
            )));
        }
        self.view.selection = Some(index);
        Ok(())
    }

    /// Leave focus mode, clear the selection and reapply global visibility.
    pub fn show_all(&mut self) {
        self.view.reset_mode();
        self.refresh(None, Part::All);
        log::debug!("showing all satellites");
    }

    /// [`Self::show_all`] plus a camera flight to the home view.
    pub fn reset_view(&mut self) {
        self.show_all();
        let camera = &self.options.camera;
        self.scene.fly_camera(camera.home_view(), camera.home_duration);
    }

    /// Flip orbit visibility. Returns the new flag.
    ///
    /// In focus mode only the focused satellite's orbit is recomputed.
    pub fn toggle_orbits(&mut self) -> bool {
        self.view.show_orbits = !self.view.show_orbits;
        self.refresh(self.view.focused(), Part::Orbit);
        self.view.show_orbits
    }

    /// Flip swath visibility. Returns the new flag.
    ///
    /// In focus mode only the focused satellite's swaths are recomputed.
    pub fn toggle_projections(&mut self) -> bool {
        self.view.show_projections = !self.view.show_projections;
        self.refresh(self.view.focused(), Part::Swaths);
        self.view.show_projections
    }

    /// Flip label visibility on every marker, regardless of focus. Returns
    /// the new flag.
    pub fn toggle_labels(&mut self) -> bool {
        self.view.show_labels = !self.view.show_labels;
        self.refresh(None, Part::Labels);
        self.view.show_labels
    }
}
