//! JSON API over the reschedule checks, used by the booking UI and the
//! reschedule-request handlers.

pub mod handlers;
pub mod models;

use crate::config::Config;
use crate::error::AppResult;
use crate::utils::i18n::Translator;
use axum::{
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{
    health_handler, reschedule_check_handler, schedule_handler, working_hours_handler,
};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<Translator>,
    /// Time zone parsed from the config
    pub tz: Tz,
}

impl AppState {
    /// Build the state, loading the bundled translations
    pub fn new(config: Config) -> AppResult<Self> {
        let tz = config.tz()?;
        let translator = Translator::embedded(&config.default_locale)?;
        Ok(Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
            tz,
        })
    }
}

/// Build the router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/schedule", get(schedule_handler))
        .route("/api/working-hours", get(working_hours_handler))
        .route("/api/reschedule/check", post(reschedule_check_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
