//! Time-sampled satellite track.
//!
//! Samples are spread evenly over the simulated window starting at the
//! window start: sample `i` sits at `start + i * window / n`. Positions are
//! interpolated linearly in ECEF between neighbouring samples; queries
//! outside the sampled span return `None` and the scene decides how to
//! present that.

use chrono::{DateTime, Utc};
use glam::{DMat3, DQuat, DVec3};

use crate::clock::{seconds, seconds_between};
use crate::geo::{geodetic_surface_normal, Geodetic};

/// Evenly spaced ECEF samples with interpolation queries.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTrack {
    start: DateTime<Utc>,
    step_seconds: f64,
    positions: Vec<DVec3>,
}

impl SampledTrack {
    /// Spread `points` evenly over `window_seconds` starting at `start`.
    #[must_use]
    pub fn from_geodetic(
        start: DateTime<Utc>,
        window_seconds: f64,
        points: &[Geodetic],
    ) -> Self {
        let step_seconds = if points.is_empty() {
            0.0
        } else {
            window_seconds / points.len() as f64
        };
        Self {
            start,
            step_seconds,
            positions: points.iter().map(Geodetic::to_ecef).collect(),
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the track has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Seconds between consecutive samples.
    #[must_use]
    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    /// Time of sample `index`.
    #[must_use]
    pub fn sample_time(&self, index: usize) -> DateTime<Utc> {
        self.start + seconds(index as f64 * self.step_seconds)
    }

    /// Raw ECEF samples.
    #[must_use]
    pub fn samples(&self) -> &[DVec3] {
        &self.positions
    }

    /// Fractional sample index for `time`, `None` outside the sampled span.
    fn sample_coordinate(&self, time: DateTime<Utc>) -> Option<f64> {
        let last = self.positions.len().checked_sub(1)?;
        if self.step_seconds <= 0.0 {
            return None;
        }
        let s = seconds_between(self.start, time) / self.step_seconds;
        (0.0..=last as f64).contains(&s).then_some(s)
    }

    /// Segment index and blend factor for a fractional sample index.
    fn segment(&self, s: f64) -> (usize, f64) {
        let max_segment = self.positions.len().saturating_sub(2);
        let i = (s.floor() as usize).min(max_segment);
        (i, s - i as f64)
    }

    /// Interpolated ECEF position in meters.
    #[must_use]
    pub fn position_at(&self, time: DateTime<Utc>) -> Option<DVec3> {
        let s = self.sample_coordinate(time)?;
        if self.positions.len() == 1 {
            return self.positions.first().copied();
        }
        let (i, t) = self.segment(s);
        Some(self.positions[i].lerp(self.positions[i + 1], t))
    }

    /// Velocity in m/s implied by the bracketing samples.
    #[must_use]
    pub fn velocity_at(&self, time: DateTime<Utc>) -> Option<DVec3> {
        if self.positions.len() < 2 {
            return None;
        }
        let s = self.sample_coordinate(time)?;
        let (i, _) = self.segment(s);
        Some((self.positions[i + 1] - self.positions[i]) / self.step_seconds)
    }

    /// Attitude facing along the velocity with the body Z axis toward the
    /// local vertical.
    ///
    /// Body X maps to the velocity direction, body Z to the surface normal
    /// (re-orthogonalised), body Y completes the right-handed frame.
    #[must_use]
    pub fn orientation_at(&self, time: DateTime<Utc>) -> Option<DQuat> {
        let position = self.position_at(time)?;
        let tangent = self.velocity_at(time)?.try_normalize()?;
        let up = geodetic_surface_normal(position);
        let bitangent = up.cross(tangent).try_normalize()?;
        let normal = tangent.cross(bitangent);
        Some(DQuat::from_mat3(&DMat3::from_cols(tangent, bitangent, normal)))
    }
}
