use crate::error::SatVizError;
use crate::geo::Geodetic;
use crate::view::validate_side_swing_angle;

/// A validated point-coverage query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageQuery {
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude: f64,
    /// Side-swing angle in degrees, `[0, 60]`.
    pub side_angle_deg: f64,
}

impl CoverageQuery {
    /// Validate and build a query.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] when either coordinate is not a
    /// finite number, is out of range, or the angle is outside `[0, 60]`.
    pub fn new(
        latitude: f64,
        longitude: f64,
        side_angle_deg: f64,
    ) -> Result<Self, SatVizError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(SatVizError::Validation(
                "latitude and longitude must be valid numbers".to_owned(),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SatVizError::Validation(format!(
                "latitude must be between -90 and 90, got {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SatVizError::Validation(format!(
                "longitude must be between -180 and 180, got {longitude}"
            )));
        }
        let side_angle_deg = validate_side_swing_angle(side_angle_deg)?;
        Ok(Self {
            latitude,
            longitude,
            side_angle_deg,
        })
    }

    /// Query point on the ellipsoid surface.
    #[must_use]
    pub fn point(&self) -> Geodetic {
        Geodetic::on_surface(self.longitude, self.latitude)
    }

    /// Request parameters in endpoint order.
    #[must_use]
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("side_angle", self.side_angle_deg.to_string()),
        ]
    }
}
