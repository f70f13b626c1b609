use crate::error::{time_error, AppResult};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};

/// Accepted formats for timestamps without an offset
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp into the given time zone.
///
/// RFC 3339 input keeps its instant and is converted to `tz`; input without
/// an offset is read as wall-clock time in `tz`.
pub fn parse_timestamp<Tz: TimeZone>(input: &str, tz: &Tz) -> AppResult<DateTime<Tz>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(tz));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| time_error(&format!("Unrecognized timestamp '{}'", input)))?;

    localize(&naive, tz)
}

/// Attach a time zone to a wall-clock time
pub fn localize<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> AppResult<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Ok(dt),
        // Repeated hour at the end of daylight saving time, take the first
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(time_error(&format!(
            "Local time {} does not exist in this time zone",
            naive
        ))),
    }
}

/// Format hours with one decimal, dropping a trailing ".0"
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
