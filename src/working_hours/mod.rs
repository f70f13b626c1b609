//! Business-hours arithmetic against the fixed weekly schedule.
//!
//! Everything here is pure: no I/O, no shared state, no error channel.

mod calculator;
pub mod schedule;

pub use calculator::{
    calculate_working_hours_between, is_within_working_hours, WorkingHoursResult,
    LATE_RESCHEDULE_THRESHOLD_HOURS,
};
pub use schedule::{OpeningHours, WeeklySchedule};
