//! Geographic coordinate type and distance utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Segment projection treats
//! longitude/latitude as a locally planar `(x, y)` frame, so the planar
//! helpers here work directly in degrees; only [`GeoPoint::distance_m`]
//! produces metres.

use crate::{CoreError, CoreResult};

/// Mean Earth radius used by the haversine formula, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn checked(lat: f64, lon: f64) -> CoreResult<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lon })
        }
    }

    /// Build from planar `(x, y)` = `(lon, lat)` order, as GeoJSON stores it.
    #[inline]
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self { lat: y, lon: x }
    }

    /// Planar x coordinate (longitude).
    #[inline(always)]
    pub fn x(self) -> f64 {
        self.lon
    }

    /// Planar y coordinate (latitude).
    #[inline(always)]
    pub fn y(self) -> f64 {
        self.lat
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Symmetric, and exactly `0.0` for identical points.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Euclidean distance in the planar lon/lat frame (degrees).
    ///
    /// Used to rank projection candidates; never reported as a length.
    #[inline]
    pub fn planar_distance(self, other: GeoPoint) -> f64 {
        (self.x() - other.x()).hypot(self.y() - other.y())
    }

    /// `[x, y]` array for spatial-index entries.
    #[inline]
    pub fn to_xy(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lon)
    }
}
