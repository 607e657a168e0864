// src/info/filetime.rs
//! File-time ticks: 100 ns intervals since 1601-01-01 00:00:00 UTC.

use chrono::{DateTime, Datelike, Utc};

use crate::errors::LoadFailure;

pub const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;
/// Seconds between 1601-01-01 and the unix epoch.
const EPOCH_OFFSET_SECS: i64 = 11_644_473_600;
const MAX_YEAR: i32 = 9999;

/// Layout used for the `date` field, e.g. `2019 Apr 17 @ 18:40:00`.
pub const DATE_FORMAT: &str = "%Y %b %d @ %H:%M:%S";

pub fn ticks_to_datetime(ticks: i64) -> Result<DateTime<Utc>, LoadFailure> {
    if ticks < 0 {
        return Err(LoadFailure::FieldParseFailure(format!(
            "file time {} is negative",
            ticks
        )));
    }

    let secs = ticks / TICKS_PER_SECOND - EPOCH_OFFSET_SECS;
    let nanos = (ticks % TICKS_PER_SECOND) * NANOS_PER_TICK;
    let datetime = DateTime::<Utc>::from_timestamp(secs, nanos as u32).ok_or_else(|| {
        LoadFailure::FieldParseFailure(format!("file time {} is out of range", ticks))
    })?;

    if datetime.year() > MAX_YEAR {
        return Err(LoadFailure::FieldParseFailure(format!(
            "file time {} is past year {}",
            ticks, MAX_YEAR
        )));
    }
    Ok(datetime)
}

pub fn datetime_to_ticks(datetime: &DateTime<Utc>) -> Option<i64> {
    let secs = datetime.timestamp().checked_add(EPOCH_OFFSET_SECS)?;
    if secs < 0 {
        return None;
    }
    let sub_ticks = i64::from(datetime.timestamp_subsec_nanos()) / NANOS_PER_TICK;
    secs.checked_mul(TICKS_PER_SECOND)?.checked_add(sub_ticks)
}

pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(DATE_FORMAT).to_string()
}
