use rustc_hash::{FxHashMap, FxHashSet};

use super::{CameraFlight, ObjectId, SceneError, SceneInterface, SceneObject};
use crate::clock::{ClockState, WINDOW_SECONDS};
use crate::geo::{Geodetic, HeadingPitchRange};
use crate::options::DisplayOptions;

/// One attached object with its current visibility.
#[derive(Debug, Clone)]
pub struct SceneEntry {
    /// The object as it was added.
    pub object: SceneObject,
    /// Current `show` property.
    pub visible: bool,
    /// Current label visibility (`None` for label-less objects).
    pub label_visible: Option<bool>,
}

/// In-memory scene that validates and records every call.
///
/// Geometry is checked the way a real globe would refuse it: polylines need
/// at least two valid vertices, markers need a non-empty track and a model
/// URI, points need a valid position.
pub struct MemoryScene {
    entries: FxHashMap<ObjectId, SceneEntry>,
    next_id: u64,
    flights: Vec<CameraFlight>,
    clock: ClockState,
    display: DisplayOptions,
    rejected_names: FxHashSet<String>,
}

impl MemoryScene {
    /// Empty scene with a paused one-day clock starting at `start`,
    /// constructed with the default display configuration.
    #[must_use]
    pub fn new(start: chrono::DateTime<chrono::Utc>) -> Self {
        Self::with_display(start, &DisplayOptions::default())
    }

    /// Empty scene constructed with `display` (widgets, sky, shadows and
    /// render-context preferences).
    #[must_use]
    pub fn with_display(start: chrono::DateTime<chrono::Utc>, display: &DisplayOptions) -> Self {
        log::debug!(
            "scene constructed: timeline {}, animation widget {}, atmosphere {}, {:?} GPU",
            display.timeline,
            display.animation,
            display.sky_atmosphere,
            display.context.power_preference
        );
        Self {
            entries: FxHashMap::default(),
            next_id: 1,
            flights: Vec::new(),
            clock: ClockState::new(start, WINDOW_SECONDS, 1.0),
            display: display.clone(),
            rejected_names: FxHashSet::default(),
        }
    }

    /// Display configuration the scene was constructed with.
    #[must_use]
    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    /// Refuse any future object with this exact name, as a backend would
    /// refuse a resource it cannot load.
    pub fn reject_objects_named(&mut self, name: impl Into<String>) {
        let _ = self.rejected_names.insert(name.into());
    }

    /// Number of attached objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether a handle is attached.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Read access to an attached object.
    #[must_use]
    pub fn entry(&self, id: ObjectId) -> Option<&SceneEntry> {
        self.entries.get(&id)
    }

    /// Current `show` property, `None` if detached.
    #[must_use]
    pub fn is_visible(&self, id: ObjectId) -> Option<bool> {
        self.entries.get(&id).map(|e| e.visible)
    }

    /// Current label visibility, `None` if detached or label-less.
    #[must_use]
    pub fn is_label_visible(&self, id: ObjectId) -> Option<bool> {
        self.entries.get(&id).and_then(|e| e.label_visible)
    }

    /// Handles of all attached objects, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Handles of attached objects with the given name.
    #[must_use]
    pub fn ids_named(&self, name: &str) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.object.name() == name)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Every camera flight requested so far, oldest first.
    #[must_use]
    pub fn flights(&self) -> &[CameraFlight] {
        &self.flights
    }

    /// Most recent camera flight.
    #[must_use]
    pub fn last_flight(&self) -> Option<&CameraFlight> {
        self.flights.last()
    }

    fn validate(&self, object: &SceneObject) -> Result<(), SceneError> {
        if self.rejected_names.contains(object.name()) {
            return Err(SceneError::InvalidGeometry(format!(
                "resource for '{}' could not be loaded",
                object.name()
            )));
        }
        match object {
            SceneObject::Polyline(line) => {
                if line.positions.len() < 2 {
                    return Err(SceneError::InvalidGeometry(format!(
                        "polyline '{}' needs at least 2 vertices, got {}",
                        line.name,
                        line.positions.len()
                    )));
                }
                if let Some(bad) =
                    line.positions.iter().find(|p| !p.is_valid())
                {
                    return Err(SceneError::InvalidGeometry(format!(
                        "polyline '{}' has invalid vertex {bad:?}",
                        line.name
                    )));
                }
            }
            SceneObject::Marker(marker) => {
                if marker.track.is_empty() {
                    return Err(SceneError::InvalidGeometry(format!(
                        "marker '{}' has an empty track",
                        marker.name
                    )));
                }
                if marker.model.uri.is_empty() {
                    return Err(SceneError::InvalidGeometry(format!(
                        "marker '{}' has no model",
                        marker.name
                    )));
                }
            }
            SceneObject::Point(point) => {
                if !point.position.is_valid() {
                    return Err(SceneError::InvalidGeometry(format!(
                        "point '{}' has invalid position {:?}",
                        point.name, point.position
                    )));
                }
            }
        }
        Ok(())
    }

    fn entry_mut(&mut self, id: ObjectId) -> Result<&mut SceneEntry, SceneError> {
        self.entries
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id.0))
    }
}

impl SceneInterface for MemoryScene {
    fn add_object(&mut self, object: SceneObject) -> Result<ObjectId, SceneError> {
        self.validate(&object)?;
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        log::trace!("scene: add #{} '{}'", id.0, object.name());
        let entry = SceneEntry {
            visible: object.initial_show(),
            label_visible: object.initial_label_show(),
            object,
        };
        let _ = self.entries.insert(id, entry);
        Ok(id)
    }

    fn remove_object(&mut self, id: ObjectId) -> bool {
        self.entries.remove(&id).is_some()
    }

    fn set_visible(&mut self, id: ObjectId, visible: bool) -> Result<(), SceneError> {
        self.entry_mut(id)?.visible = visible;
        Ok(())
    }

    fn set_label_visible(
        &mut self,
        id: ObjectId,
        visible: bool,
    ) -> Result<(), SceneError> {
        let entry = self.entry_mut(id)?;
        if entry.label_visible.is_some() {
            entry.label_visible = Some(visible);
        }
        Ok(())
    }

    fn fly_to(
        &mut self,
        id: ObjectId,
        duration: f64,
        offset: Option<HeadingPitchRange>,
    ) -> Result<(), SceneError> {
        if !self.entries.contains_key(&id) {
            return Err(SceneError::UnknownObject(id.0));
        }
        self.flights.push(CameraFlight::ToObject {
            id,
            duration,
            offset,
        });
        Ok(())
    }

    fn fly_camera(&mut self, destination: Geodetic, duration: f64) {
        self.flights.push(CameraFlight::ToPosition {
            destination,
            duration,
        });
    }

    fn clock(&self) -> &ClockState {
        &self.clock
    }

    fn set_clock(&mut self, clock: ClockState) {
        self.clock = clock;
    }
}
