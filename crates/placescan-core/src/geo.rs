//! Great-circle distance and the search center a run is anchored to.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius used for haversine distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Center point and radius of one search run. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCenter {
    point: GeoPoint,
    radius_m: u32,
}

impl SearchCenter {
    /// # Errors
    ///
    /// Returns [`CoreError`] when a coordinate is out of range (or not a
    /// number) or the radius is zero.
    pub fn new(lat: f64, lng: f64, radius_m: u32) -> Result<Self, CoreError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidLatitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::InvalidLongitude(lng));
        }
        if radius_m == 0 {
            return Err(CoreError::ZeroRadius);
        }
        Ok(Self {
            point: GeoPoint::new(lat, lng),
            radius_m,
        })
    }

    #[must_use]
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    #[must_use]
    pub fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Straight-line distance from the center to `point`, in meters.
    #[must_use]
    pub fn distance_to(&self, point: GeoPoint) -> f64 {
        haversine_m(self.point, point)
    }

    /// `true` when `distance_m` lies inside the radius (boundary included).
    #[must_use]
    pub fn accepts(&self, distance_m: f64) -> bool {
        distance_m <= f64::from(self.radius_m)
    }
}

/// Haversine great-circle distance between two points, in meters.
///
/// Uses the `atan2` form, which stays accurate for both tiny and
/// near-antipodal separations. The deltas are taken as absolute values so
/// the result is bit-for-bit symmetric in its arguments.
#[must_use]
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).abs().to_radians();
    let d_lambda = (b.lng - a.lng).abs().to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] near antipodes.
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_M * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}
