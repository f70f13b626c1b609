use crate::utils::i18n::Translator;
use crate::utils::time::format_hours;
use crate::working_hours::{WeeklySchedule, WorkingHoursResult, LATE_RESCHEDULE_THRESHOLD_HOURS};
use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How much notice a reschedule request gave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescheduleNotice {
    /// At least the required business hours remain before the appointment
    OnTime,
    /// Fewer than the required business hours remain
    Late,
    /// The appointment has already started
    AppointmentPassed,
}

impl RescheduleNotice {
    /// Translation key of the explanation
    pub fn message_key(&self) -> &'static str {
        match self {
            RescheduleNotice::OnTime => "reschedule_on_time",
            RescheduleNotice::Late => "reschedule_late",
            RescheduleNotice::AppointmentPassed => "reschedule_appointment_passed",
        }
    }
}

/// Outcome of checking a reschedule request against the business hours
#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleAssessment {
    pub requested_at: NaiveDateTime,
    pub appointment_start: NaiveDateTime,
    pub hours: WorkingHoursResult,
}

impl RescheduleAssessment {
    pub fn notice(&self) -> RescheduleNotice {
        if self.appointment_start <= self.requested_at {
            RescheduleNotice::AppointmentPassed
        } else if self.hours.is_late_reschedule {
            RescheduleNotice::Late
        } else {
            RescheduleNotice::OnTime
        }
    }

    pub fn is_late(&self) -> bool {
        self.hours.is_late_reschedule
    }

    /// Whether the request itself arrived while the service was open
    pub fn requested_within_working_hours(&self) -> bool {
        self.hours.is_within_working_hours
    }

    /// Localized explanation of the notice
    pub fn message(&self, translator: &Translator, locale: &str) -> String {
        let hours = format_hours(self.hours.working_hours_remaining);
        let threshold = format_hours(LATE_RESCHEDULE_THRESHOLD_HOURS);
        let notice = self.notice();

        let mut message = translator.translate_with(
            locale,
            notice.message_key(),
            &[("hours", hours.as_str()), ("threshold", threshold.as_str())],
        );

        if notice != RescheduleNotice::AppointmentPassed && !self.requested_within_working_hours() {
            message.push(' ');
            message.push_str(&translator.translate(locale, "reschedule_outside_hours"));
        }

        message
    }
}

/// Check a reschedule request against the standard business hours
pub fn assess_reschedule<Tz: TimeZone>(
    requested_at: &DateTime<Tz>,
    appointment_start: &DateTime<Tz>,
) -> RescheduleAssessment {
    assess_reschedule_with(&WeeklySchedule::standard(), requested_at, appointment_start)
}

/// Check a reschedule request against the given business hours
pub fn assess_reschedule_with<Tz: TimeZone>(
    schedule: &WeeklySchedule,
    requested_at: &DateTime<Tz>,
    appointment_start: &DateTime<Tz>,
) -> RescheduleAssessment {
    let requested_at = requested_at.naive_local();
    let appointment_start = appointment_start.naive_local();
    let hours = schedule.working_hours_between(requested_at, appointment_start);

    let assessment = RescheduleAssessment {
        requested_at,
        appointment_start,
        hours,
    };

    debug!(
        "Reschedule requested at {} for appointment at {}: {:.2} business hours, {:?}",
        requested_at,
        appointment_start,
        hours.working_hours_remaining,
        assessment.notice()
    );

    assessment
}
