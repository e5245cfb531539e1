//! Geodetic coordinates on the WGS84 ellipsoid.
//!
//! Trajectory data arrives as (longitude°, latitude°, altitude m) triples.
//! Interpolation and orientation work in Earth-centered Earth-fixed (ECEF)
//! meters, so this module owns the conversion between the two.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// WGS84 semi-minor axis in meters.
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// A point given as longitude/latitude in degrees and height in meters
/// above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geodetic {
    /// Longitude in degrees, east positive.
    pub lon_deg: f64,
    /// Latitude in degrees, north positive.
    pub lat_deg: f64,
    /// Height above the ellipsoid in meters.
    pub alt_m: f64,
}

impl Geodetic {
    /// Point from degrees and meters.
    #[must_use]
    pub const fn new(lon_deg: f64, lat_deg: f64, alt_m: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            alt_m,
        }
    }

    /// Point on the ellipsoid surface.
    #[must_use]
    pub const fn on_surface(lon_deg: f64, lat_deg: f64) -> Self {
        Self::new(lon_deg, lat_deg, 0.0)
    }

    /// Same point raised by `meters`.
    #[must_use]
    pub fn raised(self, meters: f64) -> Self {
        Self {
            alt_m: self.alt_m + meters,
            ..self
        }
    }

    /// All components finite and latitude within the poles.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lon_deg.is_finite()
            && self.lat_deg.is_finite()
            && self.alt_m.is_finite()
            && (-90.0..=90.0).contains(&self.lat_deg)
    }

    /// ECEF position in meters.
    #[must_use]
    pub fn to_ecef(&self) -> DVec3 {
        let lon = self.lon_deg.to_radians();
        let lat = self.lat_deg.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        // Prime vertical radius of curvature
        let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        DVec3::new(
            (n + self.alt_m) * cos_lat * cos_lon,
            (n + self.alt_m) * cos_lat * sin_lon,
            (n * (1.0 - WGS84_E2) + self.alt_m) * sin_lat,
        )
    }

    /// Parse a flat `[lon, lat, alt, lon, lat, alt, ...]` array.
    ///
    /// Returns the parsed points and the number of trailing values that did
    /// not form a complete triple.
    #[must_use]
    pub fn from_flat(values: &[f64]) -> (Vec<Self>, usize) {
        let chunks = values.chunks_exact(3);
        let remainder = chunks.remainder().len();
        let points = chunks.map(|c| Self::new(c[0], c[1], c[2])).collect();
        (points, remainder)
    }
}

/// Outward ellipsoid surface normal under an ECEF position.
#[must_use]
pub fn geodetic_surface_normal(ecef: DVec3) -> DVec3 {
    let inv_a2 = 1.0 / (WGS84_A * WGS84_A);
    let inv_b2 = 1.0 / (WGS84_B * WGS84_B);
    DVec3::new(ecef.x * inv_a2, ecef.y * inv_a2, ecef.z * inv_b2)
        .normalize_or_zero()
}

/// Camera offset relative to a target: heading and pitch in radians, range
/// in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingPitchRange {
    /// Heading in radians (0 = north).
    pub heading: f64,
    /// Pitch in radians (negative looks down).
    pub pitch: f64,
    /// Distance from the target in meters.
    pub range: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_prime_meridian_is_on_x_axis() {
        let p = Geodetic::on_surface(0.0, 0.0).to_ecef();
        assert!((p.x - WGS84_A).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn north_pole_uses_semi_minor_axis() {
        let p = Geodetic::on_surface(0.0, 90.0).to_ecef();
        assert!((p.z - WGS84_B).abs() < 1e-3);
        let n = geodetic_surface_normal(p);
        assert!((n.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn flat_array_reports_remainder() {
        let (points, rest) =
            Geodetic::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(points.len(), 2);
        assert_eq!(rest, 1);
        assert_eq!(points[1], Geodetic::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn invalid_latitude_rejected() {
        assert!(!Geodetic::new(0.0, 91.0, 0.0).is_valid());
        assert!(!Geodetic::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(Geodetic::new(-180.0, -90.0, 7.0e5).is_valid());
    }
}
