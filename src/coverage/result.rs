use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::parse_timestamp;
use crate::geo::Geodetic;

/// Parsed response of the revisit-time endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Events over the whole window, possibly more than are listed.
    pub total_coverage_events: u64,
    /// Mean gap between consecutive events, in hours.
    #[serde(default)]
    pub average_revisit_hours: Option<f64>,
    /// Shortest gap, in hours.
    #[serde(default)]
    pub min_revisit_hours: Option<f64>,
    /// Longest gap, in hours.
    #[serde(default)]
    pub max_revisit_hours: Option<f64>,
    /// Share of sampled positions that covered the point, in percent.
    #[serde(default)]
    pub coverage_percentage: Option<f64>,
    /// The point the backend evaluated.
    pub query_point: QueryPoint,
    /// Listed events in time order; may be a prefix of all events.
    #[serde(default)]
    pub coverage_times: Vec<CoverageEvent>,
}

impl CoverageResult {
    /// Whether fewer events are listed than occurred.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        (self.coverage_times.len() as u64) < self.total_coverage_events
    }
}

/// Query location echoed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// One pass of a satellite over the query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageEvent {
    /// Satellite name.
    pub satellite: String,
    /// ISO-8601 event time as sent.
    pub time: String,
    /// Ground distance from the query point to the sub-satellite point.
    pub distance_km: f64,
    /// Satellite position at the event.
    pub satellite_position: SatellitePosition,
}

impl CoverageEvent {
    /// Event time, if the backend's timestamp parses.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.time)
    }
}

/// Satellite location in degrees and meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatellitePosition {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Altitude in meters.
    pub altitude: f64,
}

impl From<SatellitePosition> for Geodetic {
    fn from(p: SatellitePosition) -> Self {
        Self::new(p.longitude, p.latitude, p.altitude)
    }
}

/// Body of the revisit-time endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CoveragePayload {
    Error { error: String },
    Result(CoverageResult),
}
