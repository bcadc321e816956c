use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::Router;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_stats).delete(reset_stats))
        .route("/streak-mode", put(set_streak_mode))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreakModeRequest {
    correct_only: bool,
}

async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let now = state.now();
    let session = state.session().await;
    Ok(ok(session.stats_view(now)))
}

async fn reset_stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let now = state.now();
    let mut session = state.session().await;
    session.reset_stats(now);
    Ok(ok(session.stats_view(now)))
}

async fn set_streak_mode(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<StreakModeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = state.now();
    let mut session = state.session().await;
    session.set_streak_mode(req.correct_only, now);
    Ok(ok(session.stats_view(now)))
}
