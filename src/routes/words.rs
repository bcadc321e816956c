use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::Router;
use serde::Deserialize;

use crate::catalog::Category;
use crate::extractors::{JsonBody, QueryParams};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words))
        .route("/:term/known", put(set_known))
}

#[derive(Debug, Default, Deserialize)]
struct WordsQuery {
    category: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct KnownRequest {
    known: bool,
}

async fn list_words(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<WordsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session().await;
    Ok(ok(session.words(query.category)))
}

async fn set_known(
    State(state): State<AppState>,
    Path(term): Path<String>,
    JsonBody(req): JsonBody<KnownRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session().await;
    let changed = session.set_word_known(&term, req.known)?;
    Ok(ok(serde_json::json!({
        "term": term,
        "known": req.known,
        "changed": changed,
        "quiz": session.quiz_view(),
    })))
}
