//! Time utilities for the fixed Riyadh zone (UTC+3, no DST).
//!
//! No tz database: the zone has one permanent offset, so every conversion
//! is a constant shift.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

pub const UTC_OFFSET_HOURS: i64 = 3;

/// Rendered in place of a time that cannot be represented.
pub const INVALID_TEXT: &str = "Invalid";

/// Wall-clock fields in the Riyadh zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl LocalParts {
    fn from_naive(ndt: NaiveDateTime) -> Self {
        Self {
            year: ndt.year(),
            month: ndt.month(),
            day: ndt.day(),
            hour: ndt.hour(),
            minute: ndt.minute(),
        }
    }

    /// `YYYY-MM-DD`, the form's date field format.
    pub fn date_text(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `HH:MM` on a 24-hour clock, the form's time field format.
    pub fn time_text(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Digit and marker set used when rendering times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    #[default]
    Latin,
    Arabic,
}

/// Convert a Riyadh wall-clock reading into an absolute instant.
///
/// Fields are not range checked. Out-of-range values roll into the
/// neighbouring period (month 13 is January of the next year, day 32 spills
/// into the next month, negative values roll backwards). Returns `None` only
/// when the result falls outside the representable range.
pub fn resolve_local_date_time(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
) -> Option<DateTime<Utc>> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let y = i32::try_from(months.div_euclid(12)).ok()?;
    let m = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let month_start = NaiveDate::from_ymd_opt(y, m, 1)?.and_hms_opt(0, 0, 0)?;

    let offset_minutes = (i64::from(day) - 1) * 24 * 60
        + (i64::from(hour) - UTC_OFFSET_HOURS) * 60
        + i64::from(minute);

    let utc = month_start.checked_add_signed(Duration::minutes(offset_minutes))?;
    Some(utc.and_utc())
}

fn to_local(instant: DateTime<Utc>) -> Option<NaiveDateTime> {
    instant
        .naive_utc()
        .checked_add_signed(Duration::hours(UTC_OFFSET_HOURS))
}

/// Riyadh wall-clock fields for a given instant.
pub fn local_parts_at(instant: DateTime<Utc>) -> Option<LocalParts> {
    to_local(instant).map(LocalParts::from_naive)
}

/// Riyadh wall-clock fields for the current system time.
pub fn current_local_parts() -> LocalParts {
    let now = Utc::now();
    // The present is far inside chrono's range; the UTC fallback is unreachable in practice.
    local_parts_at(now).unwrap_or_else(|| LocalParts::from_naive(now.naive_utc()))
}

/// `h:mm AM` in the Riyadh zone, Latin digits.
pub fn format_time(instant: DateTime<Utc>) -> String {
    format_time_in(instant, Script::Latin)
}

/// `Www, DD/MM/YYYY, h:mm AM` in the Riyadh zone, Latin digits.
pub fn format_date_time(instant: DateTime<Utc>) -> String {
    format_date_time_in(instant, Script::Latin)
}

pub fn format_time_in(instant: DateTime<Utc>, script: Script) -> String {
    match to_local(instant) {
        Some(local) => localize_digits(&clock_12h(&local, script), script),
        None => INVALID_TEXT.to_string(),
    }
}

pub fn format_date_time_in(instant: DateTime<Utc>, script: Script) -> String {
    let Some(local) = to_local(instant) else {
        return INVALID_TEXT.to_string();
    };

    let date = format!("{:02}/{:02}/{:04}", local.day(), local.month(), local.year());
    let text = match script {
        Script::Latin => format!(
            "{}, {}, {}",
            weekday_short(local.weekday()),
            date,
            clock_12h(&local, script)
        ),
        Script::Arabic => format!(
            "{}، {}، {}",
            weekday_arabic(local.weekday()),
            date,
            clock_12h(&local, script)
        ),
    };
    localize_digits(&text, script)
}

fn clock_12h(local: &NaiveDateTime, script: Script) -> String {
    let (is_pm, hour) = local.hour12();
    let marker = match (script, is_pm) {
        (Script::Latin, false) => "AM",
        (Script::Latin, true) => "PM",
        (Script::Arabic, false) => "ص",
        (Script::Arabic, true) => "م",
    };
    format!("{}:{:02} {}", hour, local.minute(), marker)
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn weekday_arabic(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "الاثنين",
        Weekday::Tue => "الثلاثاء",
        Weekday::Wed => "الأربعاء",
        Weekday::Thu => "الخميس",
        Weekday::Fri => "الجمعة",
        Weekday::Sat => "السبت",
        Weekday::Sun => "الأحد",
    }
}

fn localize_digits(text: &str, script: Script) -> String {
    match script {
        Script::Latin => text.to_string(),
        Script::Arabic => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
                None => c,
            })
            .collect(),
    }
}
