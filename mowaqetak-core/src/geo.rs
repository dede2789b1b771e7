//! Great-circle distance between two points on the Earth's surface.

use serde::{Deserialize, Serialize};

use crate::input::InputError;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, InputError> {
        let p = Self { lat, lng };
        if p.is_valid() {
            Ok(p)
        } else {
            Err(InputError::MissingLocation)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }
}

/// Haversine distance in kilometers.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIYADH: GeoPoint = GeoPoint::new(24.7136, 46.6753);
    const JEDDAH: GeoPoint = GeoPoint::new(21.4858, 39.1925);

    #[test]
    fn test_same_point_is_zero() {
        for p in [RIYADH, JEDDAH, GeoPoint::new(90.0, 0.0), GeoPoint::new(-33.9, 151.2)] {
            assert_eq!(distance_km(p, p), 0.0);
        }
    }

    #[test]
    fn test_riyadh_jeddah() {
        let d = distance_km(RIYADH, JEDDAH);
        assert!((d - 845.1).abs() < 1.0, "got {d}");
        assert_eq!(RIYADH.distance_to(&JEDDAH), d);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (RIYADH, JEDDAH),
            (GeoPoint::new(-45.0, 170.0), GeoPoint::new(60.0, -20.0)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_km(a, b), distance_km(b, a));
        }
    }

    #[test]
    fn test_antipodal_is_bounded_and_finite() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        let cases = [
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0)),
            (GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0)),
            (GeoPoint::new(24.7136, 46.6753), GeoPoint::new(-24.7136, -133.3247)),
        ];
        for (a, b) in cases {
            let d = distance_km(a, b);
            assert!(d.is_finite());
            assert!(d <= half_circumference + 1e-6, "got {d}");
        }
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(GeoPoint::try_new(24.0, 46.0).is_ok());
        assert!(GeoPoint::try_new(91.0, 46.0).is_err());
        assert!(GeoPoint::try_new(24.0, -180.5).is_err());
        assert!(GeoPoint::try_new(f64::NAN, 46.0).is_err());
        assert!(GeoPoint::try_new(24.0, f64::INFINITY).is_err());
    }
}
