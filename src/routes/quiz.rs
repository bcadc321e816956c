use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::quiz::{AnswerOutcome, QuizView};
use crate::response::{ok, AppError};
use crate::session::StatsView;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_question))
        .route("/answer", post(submit_answer))
        .route("/advance", post(advance))
        .route("/skip", post(skip))
        .route("/hint", post(hint))
        .route("/reset", post(reset))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest {
    answer: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    /// false when the current question had already been answered
    recorded: bool,
    is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_at: Option<usize>,
    quiz: QuizView,
    stats: StatsView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StepResponse {
    moved: bool,
    quiz: QuizView,
}

async fn current_question(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session = state.session().await;
    Ok(ok(session.quiz_view()))
}

async fn submit_answer(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.answer.trim().is_empty() {
        return Err(AppError::bad_request("EMPTY_ANSWER", "answer must not be empty"));
    }

    let now = state.now();
    let mut session = state.session().await;
    let outcome = session.answer(&req.answer, now);
    let quiz = session.quiz_view();

    let (recorded, is_correct, retry_at) = match outcome {
        AnswerOutcome::Recorded {
            is_correct,
            retry_at,
        } => (true, Some(is_correct), retry_at),
        AnswerOutcome::AlreadyAnswered => (false, quiz.is_correct, None),
    };

    Ok(ok(AnswerResponse {
        recorded,
        is_correct,
        retry_at,
        stats: session.stats_view(now),
        quiz,
    }))
}

async fn advance(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    let moved = session.advance();
    Ok(ok(StepResponse {
        moved,
        quiz: session.quiz_view(),
    }))
}

async fn skip(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    let moved = session.skip();
    Ok(ok(StepResponse {
        moved,
        quiz: session.quiz_view(),
    }))
}

async fn hint(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    let moved = session.hint();
    Ok(ok(StepResponse {
        moved,
        quiz: session.quiz_view(),
    }))
}

async fn reset(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    session.reset_quiz();
    Ok(ok(session.quiz_view()))
}
