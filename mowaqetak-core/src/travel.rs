//! Synthetic travel-time estimate from straight-line distance.
//!
//! There is no routing data. We assume 1.5 minutes per km (roughly 40 km/h
//! door to door) and add a flat 5 minutes for parking and signals.

use crate::geo::{GeoPoint, distance_km};

pub const MINUTES_PER_KM: f64 = 1.5;
pub const FIXED_OVERHEAD_MINUTES: f64 = 5.0;

/// Estimated travel minutes for a raw distance. Negative input is treated as zero.
pub fn travel_minutes_for_km(km: f64) -> u32 {
    let minutes = (km.max(0.0) * MINUTES_PER_KM + FIXED_OVERHEAD_MINUTES).round();
    minutes as u32
}

pub fn estimate_travel_minutes(origin: GeoPoint, destination: GeoPoint) -> u32 {
    travel_minutes_for_km(distance_km(origin, destination))
}
