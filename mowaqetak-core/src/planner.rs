//! Appointment planner: back-computes the leave-by instant.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::GeoPoint;
use crate::travel::estimate_travel_minutes;

/// The single persisted planning result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPlan {
    pub origin: GeoPoint,
    pub destination: GeoPoint,

    /// Display only.
    #[serde(default, alias = "destLabel")]
    pub destination_label: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub arrive_at: DateTime<Utc>,

    /// Always `<= arrive_at`.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub leave_at: DateTime<Utc>,

    pub travel_minutes: u32,
    pub prep_minutes: u32,
    pub delay_minutes: u32,
}

impl AppointmentPlan {
    /// Preparation + delay + travel, in minutes.
    pub fn lead_minutes(&self) -> u64 {
        lead_minutes(self.prep_minutes, self.delay_minutes, self.travel_minutes)
    }
}

fn lead_minutes(prep: u32, delay: u32, travel: u32) -> u64 {
    u64::from(prep) + u64::from(delay) + u64::from(travel)
}

/// Plan an appointment.
///
/// Inputs are assumed validated (see `input`). The subtraction saturates at
/// the earliest representable instant, so this never panics.
pub fn plan_appointment(
    origin: GeoPoint,
    destination: GeoPoint,
    destination_label: impl Into<String>,
    arrive_at: DateTime<Utc>,
    prep_minutes: u32,
    delay_minutes: u32,
) -> AppointmentPlan {
    let travel_minutes = estimate_travel_minutes(origin, destination);
    let total = lead_minutes(prep_minutes, delay_minutes, travel_minutes);

    // u32 * 3 always fits in i64 minutes.
    let leave_at = arrive_at
        .checked_sub_signed(Duration::minutes(total as i64))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    debug!(
        travel_minutes,
        prep_minutes,
        delay_minutes,
        leave_at = %leave_at,
        "planned appointment"
    );

    AppointmentPlan {
        origin,
        destination,
        destination_label: destination_label.into(),
        arrive_at,
        leave_at,
        travel_minutes,
        prep_minutes,
        delay_minutes,
    }
}
