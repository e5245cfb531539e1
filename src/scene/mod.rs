//! The scene capability interface.
//!
//! The engine never draws anything itself. It consumes a 3D scene through
//! [`SceneInterface`]: add/remove objects, toggle object and label
//! visibility, animate the camera and read/write the simulated clock.
//! [`MemoryScene`] is an in-memory implementation that records every call;
//! it backs the headless binary and the test suite.

mod memory;
mod object;

use std::fmt;

pub use memory::{MemoryScene, SceneEntry};
pub use object::{
    CameraFlight, LabelSpec, MarkerSpec, ModelSpec, ObjectId, PointSpec,
    PolylineSpec, Rgba, SceneObject,
};

use crate::clock::ClockState;
use crate::geo::{Geodetic, HeadingPitchRange};

/// Errors reported by a scene implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No object with this id is attached.
    UnknownObject(u64),
    /// The object description cannot be drawn.
    InvalidGeometry(String),
    /// The backend is not available.
    Unavailable(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownObject(id) => write!(f, "unknown scene object #{id}"),
            Self::InvalidGeometry(msg) => write!(f, "invalid geometry: {msg}"),
            Self::Unavailable(msg) => write!(f, "scene unavailable: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Capabilities the engine needs from a 3D globe.
pub trait SceneInterface {
    /// Attach an object and return its handle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if the object cannot be drawn.
    fn add_object(&mut self, object: SceneObject) -> Result<ObjectId, SceneError>;

    /// Detach an object. Returns `false` if it was not attached.
    fn remove_object(&mut self, id: ObjectId) -> bool;

    /// Set an object's `show` property.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] for a detached handle.
    fn set_visible(&mut self, id: ObjectId, visible: bool) -> Result<(), SceneError>;

    /// Set the visibility of an object's label.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] for a detached handle.
    fn set_label_visible(
        &mut self,
        id: ObjectId,
        visible: bool,
    ) -> Result<(), SceneError>;

    /// Animate the camera to frame an object.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] for a detached handle.
    fn fly_to(
        &mut self,
        id: ObjectId,
        duration: f64,
        offset: Option<HeadingPitchRange>,
    ) -> Result<(), SceneError>;

    /// Animate the camera to a destination.
    fn fly_camera(&mut self, destination: Geodetic, duration: f64);

    /// Current simulated clock.
    fn clock(&self) -> &ClockState;

    /// Replace the simulated clock.
    fn set_clock(&mut self, clock: ClockState);
}
