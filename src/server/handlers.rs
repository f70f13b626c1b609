use super::models::{
    ErrorResponse, RescheduleCheckRequest, RescheduleCheckResponse, ScheduleDay, ScheduleQuery,
    WorkingHoursQuery, WorkingHoursResponse,
};
use super::AppState;
use crate::reschedule::assess_reschedule;
use crate::utils::time::parse_timestamp;
use crate::working_hours::{is_within_working_hours, WeeklySchedule};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc, Weekday};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

/// Rejection returned by the JSON handlers, with a localized message
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {}", self.message);

        let body = ErrorResponse {
            error: self.message,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Appointments further ahead than this are not assessed
pub const MAX_NOTICE_HORIZON_DAYS: i64 = 2 * 366;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Publish the weekly business hours with localized day names
pub async fn schedule_handler(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Json<Vec<ScheduleDay>> {
    let locale = resolve_locale(&state, query.locale.as_deref());
    let closed_label = state.translator.translate(locale, "schedule_closed");

    let days = WeeklySchedule::standard()
        .iter()
        .map(|(weekday, hours)| {
            let day = day_key(weekday);
            let name = state.translator.translate(locale, &format!("day_{}", day));
            match hours {
                Some(hours) => ScheduleDay {
                    day: day.to_string(),
                    name,
                    open: Some(format!("{:02}:00", hours.open)),
                    close: Some(format!("{:02}:00", hours.close)),
                    closed: false,
                    label: hours.format(),
                },
                None => ScheduleDay {
                    day: day.to_string(),
                    name,
                    open: None,
                    close: None,
                    closed: true,
                    label: closed_label.clone(),
                },
            }
        })
        .collect();

    Json(days)
}

/// Check whether a timestamp falls inside business hours
pub async fn working_hours_handler(
    State(state): State<AppState>,
    Query(query): Query<WorkingHoursQuery>,
) -> ApiResult<WorkingHoursResponse> {
    let locale = resolve_locale(&state, query.locale.as_deref());
    let at = timestamp_or_now(&state, locale, query.at.as_deref())?;

    Ok(Json(WorkingHoursResponse {
        at: at.to_rfc3339(),
        is_within_working_hours: is_within_working_hours(&at),
    }))
}

/// Assess a reschedule request
pub async fn reschedule_check_handler(
    State(state): State<AppState>,
    Json(request): Json<RescheduleCheckRequest>,
) -> ApiResult<RescheduleCheckResponse> {
    let locale = resolve_locale(&state, request.locale.as_deref());
    let appointment_start = parse_in_zone(&state, locale, &request.appointment_start)?;
    let requested_at = timestamp_or_now(&state, locale, request.requested_at.as_deref())?;

    if appointment_start - requested_at > Duration::days(MAX_NOTICE_HORIZON_DAYS) {
        let days = MAX_NOTICE_HORIZON_DAYS.to_string();
        return Err(ApiError::bad_request(state.translator.translate_with(
            locale,
            "error_notice_horizon",
            &[("days", days.as_str())],
        )));
    }

    let assessment = assess_reschedule(&requested_at, &appointment_start);
    let notice = assessment.notice();
    info!(
        "Reschedule check for {}: {:?} ({:.2} business hours)",
        appointment_start, notice, assessment.hours.working_hours_remaining
    );

    Ok(Json(RescheduleCheckResponse {
        working_hours_remaining: assessment.hours.working_hours_remaining,
        is_within_working_hours: assessment.hours.is_within_working_hours,
        is_late_reschedule: assessment.is_late(),
        notice,
        message: assessment.message(&state.translator, locale),
    }))
}

/// The requested locale when a catalog exists for it, else the configured one
fn resolve_locale<'a>(state: &'a AppState, requested: Option<&'a str>) -> &'a str {
    match requested {
        Some(locale) if state.translator.has_locale(locale) => locale,
        _ => &state.config.locale,
    }
}

fn parse_in_zone(state: &AppState, locale: &str, value: &str) -> Result<DateTime<Tz>, ApiError> {
    parse_timestamp(value, &state.tz).map_err(|e| {
        debug!("Timestamp rejected: {}", e);
        ApiError::bad_request(state.translator.translate_with(
            locale,
            "error_invalid_timestamp",
            &[("value", value)],
        ))
    })
}

fn timestamp_or_now(
    state: &AppState,
    locale: &str,
    input: Option<&str>,
) -> Result<DateTime<Tz>, ApiError> {
    match input {
        Some(value) => parse_in_zone(state, locale, value),
        None => Ok(Utc::now().with_timezone(&state.tz)),
    }
}

fn day_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
