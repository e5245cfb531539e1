use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geo::{Geodetic, HeadingPitchRange};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera flight parameters for focus, queries and result navigation.
pub struct CameraOptions {
    /// Flight time when focusing a satellite, in seconds.
    #[schemars(title = "Focus Flight Duration", range(min = 0.0, max = 10.0), extend("step" = 0.5))]
    pub focus_duration: f64,
    /// Heading of the focus viewpoint in degrees.
    #[schemars(skip)]
    pub focus_heading_deg: f64,
    /// Pitch of the focus viewpoint in degrees (negative looks down).
    #[schemars(title = "Focus Pitch", range(min = -90.0, max = 0.0), extend("step" = 5.0))]
    pub focus_pitch_deg: f64,
    /// Distance from the focused satellite in meters.
    #[schemars(title = "Focus Range", range(min = 10_000.0, max = 20_000_000.0))]
    pub focus_range_m: f64,
    /// Camera altitude above a query point in meters.
    #[schemars(skip)]
    pub query_altitude_m: f64,
    /// Flight time to a query point in seconds.
    #[schemars(skip)]
    pub query_duration: f64,
    /// Height added above a coverage event's satellite position, in meters.
    #[schemars(skip)]
    pub event_altitude_offset_m: f64,
    /// Flight time to a coverage event in seconds.
    #[schemars(skip)]
    pub event_duration: f64,
    /// Home view longitude in degrees.
    #[schemars(skip)]
    pub home_lon_deg: f64,
    /// Home view latitude in degrees.
    #[schemars(skip)]
    pub home_lat_deg: f64,
    /// Home view altitude in meters.
    #[schemars(title = "Home Altitude", range(min = 1_000_000.0, max = 100_000_000.0))]
    pub home_altitude_m: f64,
    /// Flight time back to the home view in seconds.
    #[schemars(skip)]
    pub home_duration: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            focus_duration: 2.0,
            focus_heading_deg: 0.0,
            focus_pitch_deg: -45.0,
            focus_range_m: 1_000_000.0,
            query_altitude_m: 1_000_000.0,
            query_duration: 1.0,
            event_altitude_offset_m: 100_000.0,
            event_duration: 1.5,
            home_lon_deg: 0.0,
            home_lat_deg: 0.0,
            home_altitude_m: 25_000_000.0,
            home_duration: 3.0,
        }
    }
}

impl CameraOptions {
    /// Viewing offset used when flying to a focused satellite.
    #[must_use]
    pub fn focus_offset(&self) -> HeadingPitchRange {
        HeadingPitchRange {
            heading: self.focus_heading_deg.to_radians(),
            pitch: self.focus_pitch_deg.to_radians(),
            range: self.focus_range_m,
        }
    }

    /// Camera destination for the home view.
    #[must_use]
    pub fn home_view(&self) -> Geodetic {
        Geodetic::new(self.home_lon_deg, self.home_lat_deg, self.home_altitude_m)
    }
}
