//! Flat-map projection for the click-to-pick map.
//!
//! The map is a plain rectangle over an approximate bounding box of the
//! Kingdom. A click at fractional position (x right, y down) maps linearly to
//! latitude/longitude; no real cartographic projection is involved.

use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

/// Rough bounds of Saudi Arabia.
pub const KSA_BOUNDS: MapBounds = MapBounds {
    lat_min: 16.0,
    lat_max: 32.0,
    lng_min: 34.0,
    lng_max: 56.0,
};

impl MapBounds {
    /// Point under fractional canvas position `(fx, fy)`, each clamped to `[0, 1]`.
    pub fn point_at(&self, fx: f64, fy: f64) -> GeoPoint {
        let fx = if fx.is_nan() { 0.0 } else { fx.clamp(0.0, 1.0) };
        let fy = if fy.is_nan() { 0.0 } else { fy.clamp(0.0, 1.0) };
        GeoPoint {
            lat: self.lat_max - (self.lat_max - self.lat_min) * fy,
            lng: self.lng_min + (self.lng_max - self.lng_min) * fx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(KSA_BOUNDS.point_at(0.0, 0.0), GeoPoint::new(32.0, 34.0));
        assert_eq!(KSA_BOUNDS.point_at(1.0, 1.0), GeoPoint::new(16.0, 56.0));
        assert_eq!(KSA_BOUNDS.point_at(0.5, 0.5), GeoPoint::new(24.0, 45.0));
    }

    #[test]
    fn test_clamps_outside_canvas() {
        assert_eq!(KSA_BOUNDS.point_at(-0.2, 1.7), GeoPoint::new(16.0, 34.0));
        assert_eq!(KSA_BOUNDS.point_at(f64::NAN, 0.25), GeoPoint::new(28.0, 34.0));
        assert_eq!(KSA_BOUNDS.point_at(0.5, f64::INFINITY), GeoPoint::new(16.0, 45.0));
    }
}
