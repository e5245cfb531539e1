//! Satellite entities: sampled tracks, the factory that turns trajectory
//! records into scene objects, and the registry that owns the handles.

mod factory;
mod registry;
mod track;

pub use factory::{
    BuildReport, EntityFactory, RecordFailure, SatelliteVisual,
    MIN_TRACK_POINTS,
};
pub use registry::{EntityRegistry, SatelliteEntry};
pub use track::SampledTrack;
