use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::extractors::{JsonBody, OptionalJsonBody};
use crate::reminder::ReminderTime;
use crate::response::{ok, AppError};
use crate::session::ReminderUpdate;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/decision", get(decision))
        .route("/dismiss", post(dismiss))
        .route("/snooze", post(snooze))
        .route("/alarms", get(list_alarms))
}

#[derive(Debug, Default, Deserialize)]
struct SnoozeRequest {
    hours: Option<i64>,
}

async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session = state.session().await;
    Ok(ok(serde_json::json!({
        "settings": session.reminder_settings(),
        "timePresets": ReminderTime::presets(),
    })))
}

async fn update_settings(
    State(state): State<AppState>,
    JsonBody(update): JsonBody<ReminderUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    session.update_reminders(update)?;
    Ok(ok(serde_json::json!({
        "settings": session.reminder_settings(),
        "alarmIds": session.alarm_ids(),
    })))
}

async fn decision(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let now = state.now();
    let session = state.session().await;
    Ok(ok(session.reminder_decision(now)))
}

async fn dismiss(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let now = state.now();
    let mut session = state.session().await;
    session.dismiss_reminder(now);
    Ok(ok(session.reminder_settings().clone()))
}

/// Body is optional; without `hours` the configured default applies.
async fn snooze(
    State(state): State<AppState>,
    OptionalJsonBody(body): OptionalJsonBody<SnoozeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hours = body.and_then(|req| req.hours);
    let now = state.now();
    let mut session = state.session().await;
    let until = session.snooze_reminder(hours, now)?;
    Ok(ok(serde_json::json!({ "snoozedUntil": until })))
}

async fn list_alarms(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.alarms().list()))
}
