use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::constants::{ALLOWED_OPTIONS_COUNTS, DAILY_GOAL_PRESETS};
use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::session::PreferencesUpdate;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_preferences).put(update_preferences))
}

async fn get_preferences(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session = state.session().await;
    Ok(ok(serde_json::json!({
        "preferences": session.preferences_view(),
        "optionsCounts": ALLOWED_OPTIONS_COUNTS,
        "dailyGoalPresets": DAILY_GOAL_PRESETS,
    })))
}

/// 任一字段不合法时整体拒绝，不做部分更新
async fn update_preferences(
    State(state): State<AppState>,
    JsonBody(update): JsonBody<PreferencesUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    session.update_preferences(update)?;
    Ok(ok(serde_json::json!({
        "preferences": session.preferences_view(),
        "quiz": session.quiz_view(),
    })))
}
