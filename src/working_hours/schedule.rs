use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Opening hours of a single day, in whole hours (`open` inclusive, `close` exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open: u32,
    pub close: u32,
}

impl OpeningHours {
    pub const fn new(open: u32, close: u32) -> Self {
        Self { open, close }
    }

    /// Whether the given hour of day falls inside these opening hours
    pub fn contains_hour(&self, hour: u32) -> bool {
        self.open <= hour && hour < self.close
    }

    /// Opening time on the given date
    pub fn opening_on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        at_hour(date, self.open)
    }

    /// Closing time on the given date, `None` past the last representable day
    pub fn closing_on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        at_hour(date, self.close)
    }

    /// Format as "09:00 - 22:00"
    pub fn format(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.open, self.close)
    }
}

/// Weekly business hours, indexed from Monday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [Option<OpeningHours>; 7],
}

impl WeeklySchedule {
    /// The service's business hours: weekdays 09-22, Saturday 09-12, Sunday closed
    pub const fn standard() -> Self {
        const WEEKDAY: Option<OpeningHours> = Some(OpeningHours::new(9, 22));
        Self {
            days: [
                WEEKDAY,
                WEEKDAY,
                WEEKDAY,
                WEEKDAY,
                WEEKDAY,
                Some(OpeningHours::new(9, 12)),
                None,
            ],
        }
    }

    /// Opening hours for a weekday, `None` when closed
    pub fn hours_for(&self, weekday: Weekday) -> Option<OpeningHours> {
        self.days[weekday.num_days_from_monday() as usize]
    }

    /// Iterate over the week starting from Monday
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<OpeningHours>)> + '_ {
        self.days
            .iter()
            .enumerate()
            .map(|(i, hours)| (weekday_from_index(i), *hours))
    }

    /// Whether the timestamp falls inside business hours.
    ///
    /// Only the hour component is consulted, so 21:59 counts as open and
    /// 22:00 as closed on a weekday.
    pub fn is_open_at(&self, timestamp: &NaiveDateTime) -> bool {
        self.hours_for(timestamp.weekday())
            .is_some_and(|hours| hours.contains_hour(timestamp.hour()))
    }

    /// Where the walk resumes on the day after `date`: its opening time, or
    /// midnight when that day is closed. `None` when `date` is the last day
    /// chrono can represent.
    pub fn next_day_start(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        let next = date.succ_opt()?;
        match self.hours_for(next.weekday()) {
            Some(hours) => hours.opening_on(next),
            None => at_hour(next, 0),
        }
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::standard()
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> Option<NaiveDateTime> {
    match date.and_hms_opt(hour, 0, 0) {
        Some(dt) => Some(dt),
        // close = 24 means the end of the day
        None if hour == 24 => Some(date.succ_opt()?.and_time(NaiveTime::MIN)),
        None => None,
    }
}

fn weekday_from_index(index: usize) -> Weekday {
    match index {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
