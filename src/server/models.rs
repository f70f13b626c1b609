use crate::reschedule::RescheduleNotice;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/reschedule/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleCheckRequest {
    /// Start of the appointment being moved
    pub appointment_start: String,
    /// When the reschedule was requested, now if missing
    pub requested_at: Option<String>,
    /// Locale of the returned message
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleCheckResponse {
    pub working_hours_remaining: f64,
    pub is_within_working_hours: bool,
    pub is_late_reschedule: bool,
    pub notice: RescheduleNotice,
    pub message: String,
}

/// Query of `GET /api/working-hours`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkingHoursQuery {
    pub at: Option<String>,
    /// Locale of the error message for an unparsable `at`
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursResponse {
    pub at: String,
    pub is_within_working_hours: bool,
}

/// Query of `GET /api/schedule`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    pub locale: Option<String>,
}

/// One weekday of the published schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub day: String,
    pub name: String,
    pub open: Option<String>,
    pub close: Option<String>,
    pub closed: bool,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
