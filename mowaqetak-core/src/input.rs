//! Form boundary: turn raw text fields into a validated planning request.
//!
//! All clamping and validation happens here, once, before the planner runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::planner::{AppointmentPlan, plan_appointment};
use crate::time::resolve_local_date_time;

pub const DEFAULT_DESTINATION_LABEL: &str = "الوجهة المحددة";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("origin and destination must both be set (pick them on the map or pass lat,lng)")]
    MissingLocation,

    #[error("appointment date and time are required (YYYY-MM-DD and HH:MM)")]
    MissingDateTime,

    #[error("appointment date/time is outside the supported range")]
    InvalidInstant,
}

/// Fallback values applied while validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub prep_minutes: u32,
    pub delay_minutes: u32,
    pub destination_label: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            prep_minutes: 0,
            delay_minutes: 0,
            destination_label: DEFAULT_DESTINATION_LABEL.to_string(),
        }
    }
}

/// Raw, unvalidated form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub origin_lat: String,
    pub origin_lng: String,
    pub dest_lat: String,
    pub dest_lng: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub prep_minutes: String,
    pub delay_minutes: String,
    pub destination_label: Option<String>,
}

/// A validated request, ready for the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub destination_label: String,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub prep_minutes: u32,
    pub delay_minutes: u32,
}

impl FormInput {
    pub fn validate(&self, defaults: &Defaults) -> Result<PlanRequest, InputError> {
        let origin = point_from_inputs(&self.origin_lat, &self.origin_lng)
            .ok_or(InputError::MissingLocation)?;
        let destination = point_from_inputs(&self.dest_lat, &self.dest_lng)
            .ok_or(InputError::MissingLocation)?;

        let (year, month, day) = split_date(&self.date).ok_or(InputError::MissingDateTime)?;
        let (hour, minute) = split_time(&self.time).ok_or(InputError::MissingDateTime)?;

        let destination_label = self
            .destination_label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.destination_label.as_str())
            .to_string();

        Ok(PlanRequest {
            origin,
            destination,
            destination_label,
            year,
            month,
            day,
            hour,
            minute,
            prep_minutes: clamp_non_neg_int(&self.prep_minutes, defaults.prep_minutes),
            delay_minutes: clamp_non_neg_int(&self.delay_minutes, defaults.delay_minutes),
        })
    }
}

impl PlanRequest {
    pub fn arrive_at(&self) -> Result<DateTime<Utc>, InputError> {
        resolve_local_date_time(self.year, self.month, self.day, self.hour, self.minute)
            .ok_or(InputError::InvalidInstant)
    }

    pub fn plan(&self) -> Result<AppointmentPlan, InputError> {
        Ok(plan_appointment(
            self.origin,
            self.destination,
            self.destination_label.clone(),
            self.arrive_at()?,
            self.prep_minutes,
            self.delay_minutes,
        ))
    }
}

/// Parse a finite coordinate. Empty text counts as missing.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn point_from_inputs(lat: &str, lng: &str) -> Option<GeoPoint> {
    let lat = parse_coordinate(lat)?;
    let lng = parse_coordinate(lng)?;
    GeoPoint::try_new(lat, lng).ok()
}

/// Floor to a non-negative integer.
///
/// Empty text is 0. Negative, non-numeric or non-finite text yields
/// `fallback`. Values beyond `u32::MAX` saturate.
pub fn clamp_non_neg_int(text: &str, fallback: u32) -> u32 {
    let t = text.trim();
    if t.is_empty() {
        return 0;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() && v.floor() >= 0.0 => v.floor().min(f64::from(u32::MAX)) as u32,
        _ => fallback,
    }
}

fn split_date(text: &str) -> Option<(i32, i32, i32)> {
    let mut it = text.trim().split('-');
    let y = it.next()?.parse().ok()?;
    let m = it.next()?.parse().ok()?;
    let d = it.next()?.parse().ok()?;
    if it.next().is_some() {
        return None;
    }
    Some((y, m, d))
}

fn split_time(text: &str) -> Option<(i32, i32)> {
    let mut it = text.trim().split(':');
    let h = it.next()?.parse().ok()?;
    let m = it.next()?.parse().ok()?;
    // Browsers may submit HH:MM:SS; seconds are ignored.
    Some((h, m))
}
