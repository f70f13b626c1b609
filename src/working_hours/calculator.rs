use super::schedule::WeeklySchedule;
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Reschedules with less business-hour notice than this are late
pub const LATE_RESCHEDULE_THRESHOLD_HOURS: f64 = 4.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Business hours between two timestamps and the derived reschedule flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursResult {
    pub working_hours_remaining: f64,
    pub is_within_working_hours: bool,
    pub is_late_reschedule: bool,
}

impl WorkingHoursResult {
    /// Result for an empty or inverted range
    pub const DEGENERATE: Self = Self {
        working_hours_remaining: 0.0,
        is_within_working_hours: false,
        is_late_reschedule: true,
    };
}

/// Position of the walk and the business hours accrued so far
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    position: NaiveDateTime,
    accrued: f64,
}

impl Cursor {
    /// Next cursor toward `end`, `None` once `end` is reached.
    /// Every step moves `position` strictly forward; when no later day can
    /// be represented the cursor jumps to `end` with what it has accrued.
    fn advance(self, schedule: &WeeklySchedule, end: NaiveDateTime) -> Option<Self> {
        if self.position >= end {
            return None;
        }

        let date = self.position.date();
        let next_day = || schedule.next_day_start(date).unwrap_or(end);
        let Some(hours) = schedule.hours_for(date.weekday()) else {
            return Some(self.moved_to(next_day()));
        };

        let hour = self.position.hour();
        if hour < hours.open {
            return Some(self.moved_to(hours.opening_on(date).unwrap_or(end)));
        }
        if hour >= hours.close {
            return Some(self.moved_to(next_day()));
        }

        let segment_end = hours.closing_on(date).map_or(end, |close| close.min(end));
        let accrued = self.accrued + hours_between(self.position, segment_end);
        let position = if segment_end < end {
            next_day()
        } else {
            segment_end
        };

        Some(Self { position, accrued })
    }

    fn moved_to(self, position: NaiveDateTime) -> Self {
        Self { position, ..self }
    }
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

impl WeeklySchedule {
    /// Business hours between `start` and `end`, walking forward one segment
    /// at a time
    pub fn working_hours_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> WorkingHoursResult {
        if start >= end {
            return WorkingHoursResult::DEGENERATE;
        }

        let accrued = std::iter::successors(
            Some(Cursor {
                position: start,
                accrued: 0.0,
            }),
            |cursor| cursor.advance(self, end),
        )
        .last()
        .map_or(0.0, |cursor| cursor.accrued);

        WorkingHoursResult {
            working_hours_remaining: accrued.max(0.0),
            is_within_working_hours: self.is_open_at(&start),
            is_late_reschedule: accrued < LATE_RESCHEDULE_THRESHOLD_HOURS,
        }
    }
}

/// Business hours from `start` to `end` under the standard schedule.
///
/// Weekday and hour are read from each timestamp's local wall clock.
pub fn calculate_working_hours_between<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> WorkingHoursResult {
    WeeklySchedule::standard().working_hours_between(start.naive_local(), end.naive_local())
}

/// Whether the timestamp falls inside the standard business hours
pub fn is_within_working_hours<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> bool {
    WeeklySchedule::standard().is_open_at(&timestamp.naive_local())
}
