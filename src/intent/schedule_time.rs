use crate::error::ScheduleError;
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};

/// Pattern the classifier is asked to answer with, e.g. `2025-07-03 14:00`.
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a classifier-supplied timestamp in server local time.
pub fn parse_schedule_time(input: &str) -> Result<DateTime<Local>, ScheduleError> {
    parse_schedule_time_in(input, &Local)
}

/// Same as [`parse_schedule_time`] against an explicit timezone.
///
/// Ambiguous wall times (DST fall-back) resolve to the earlier instant; times
/// skipped by a DST jump are rejected.
pub fn parse_schedule_time_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<DateTime<Tz>, ScheduleError> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, SCHEDULE_FORMAT).map_err(|_| {
        ScheduleError::InvalidTimestamp {
            input: trimmed.to_string(),
        }
    })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => Ok(at),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ScheduleError::NonexistentLocalTime {
            input: trimmed.to_string(),
        }),
    }
}
