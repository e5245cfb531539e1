//! Trajectory dataset: records, their wire format and the loader that
//! fetches them from the backend.

mod loader;
mod record;

pub use loader::{parse_trajectories, TrajectoryLoader, TRAJECTORY_PATH};
pub use record::TrajectoryRecord;
