#![cfg(feature = "web-interface")]

use ajanvaraus::config::Config;
use ajanvaraus::server::{router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app_with_locale("en")
}

fn app_with_locale(locale: &str) -> Router {
    let config = Config {
        locale: locale.to_string(),
        ..Config::default()
    };
    router(AppState::new(config).unwrap())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_check(body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/reschedule/check")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_reschedule_on_time() {
    let (status, body) = post_check(json!({
        "appointmentStart": "2025-03-10T10:00",
        "requestedAt": "2025-03-07T20:00",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workingHoursRemaining"], 6.0);
    assert_eq!(body["isWithinWorkingHours"], true);
    assert_eq!(body["isLateReschedule"], false);
    assert_eq!(body["notice"], "on_time");
    assert_eq!(
        body["message"],
        "Reschedule accepted. 6 business hours of notice remain."
    );
}

#[tokio::test]
async fn test_reschedule_late_in_finnish() {
    let (status, body) = post_check(json!({
        "appointmentStart": "2025-03-08T13:00",
        "requestedAt": "2025-03-08T11:00",
        "locale": "fi-FI",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workingHoursRemaining"], 1.0);
    assert_eq!(body["isLateReschedule"], true);
    assert_eq!(body["notice"], "late");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Myöhäinen ajan siirto"));
}

#[tokio::test]
async fn test_reschedule_appointment_passed() {
    let (status, body) = post_check(json!({
        "appointmentStart": "2025-03-04T10:00",
        "requestedAt": "2025-03-04T14:00",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workingHoursRemaining"], 0.0);
    assert_eq!(body["isWithinWorkingHours"], false);
    assert_eq!(body["isLateReschedule"], true);
    assert_eq!(body["notice"], "appointment_passed");
}

#[tokio::test]
async fn test_reschedule_defaults_to_now() {
    // An appointment far in the past has always started already
    let (status, body) = post_check(json!({ "appointmentStart": "2000-01-03T10:00" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "appointment_passed");
}

#[tokio::test]
async fn test_reschedule_invalid_timestamp() {
    let (status, body) = post_check(json!({
        "appointmentStart": "next tuesday",
        "requestedAt": "2025-03-04T14:00",
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("next tuesday"));

    let (status, body) = post_check(json!({
        "appointmentStart": "huomenna",
        "locale": "fi",
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Virheellinen aikaleima: huomenna");
}

#[tokio::test]
async fn test_reschedule_on_last_representable_day() {
    let (status, body) = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        post_check(json!({
            "appointmentStart": "+262142-12-31T23:00",
            "requestedAt": "+262142-12-31T22:30",
        })),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workingHoursRemaining"], 0.0);
    assert_eq!(body["isLateReschedule"], true);
    assert_eq!(body["notice"], "late");
}

#[tokio::test]
async fn test_reschedule_beyond_notice_horizon() {
    let (status, body) = post_check(json!({
        "appointmentStart": "2030-03-04T10:00",
        "requestedAt": "2025-03-04T10:00",
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Appointments more than 732 days ahead cannot be checked."
    );

    // Two years ahead is still assessed
    let (status, body) = post_check(json!({
        "appointmentStart": "2027-03-04T10:00",
        "requestedAt": "2025-03-04T10:00",
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "on_time");
}

#[tokio::test]
async fn test_reschedule_missing_field() {
    let (status, _) = post_check(json!({ "requestedAt": "2025-03-04T14:00" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_working_hours_query() {
    let (status, body) = get_json("/api/working-hours?at=2025-03-09T10:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isWithinWorkingHours"], false);
    assert_eq!(body["at"], "2025-03-09T10:00:00+02:00");

    let (_, body) = get_json("/api/working-hours?at=2025-03-04T21:59").await;
    assert_eq!(body["isWithinWorkingHours"], true);

    let (status, body) = get_json("/api/working-hours?at=soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid timestamp: soon");

    let (_, body) = get_json("/api/working-hours?at=soon&locale=fi").await;
    assert_eq!(body["error"], "Virheellinen aikaleima: soon");
}

#[tokio::test]
async fn test_schedule_localized() {
    let (status, body) = get_json("/api/schedule?locale=fi").await;
    assert_eq!(status, StatusCode::OK);

    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], "monday");
    assert_eq!(days[0]["name"], "Maanantai");
    assert_eq!(days[0]["open"], "09:00");
    assert_eq!(days[0]["close"], "22:00");
    assert_eq!(days[5]["close"], "12:00");
    assert_eq!(days[6]["closed"], true);
    assert_eq!(days[6]["label"], "Suljettu");

    // Unknown locales fall back to the configured one
    let (_, body) = get_json("/api/schedule?locale=sv").await;
    assert_eq!(body[0]["name"], "Monday");
}

#[tokio::test]
async fn test_unknown_locale_uses_configured_locale() {
    let request = Request::builder()
        .uri("/api/schedule?locale=sv")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app_with_locale("fi"), request).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body[0]["name"], "Maanantai");
}
