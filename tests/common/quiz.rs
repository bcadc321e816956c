use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

use vocab_drill::catalog::{CatalogSet, Language};

use super::http::call;

/// Looks the current prompt up in the built-in catalog and returns the option that is right.
pub fn correct_option(quiz: &Value) -> String {
    let language: Language = serde_json::from_value(quiz["language"].clone()).expect("language");
    let prompt = quiz["prompt"].as_str().expect("prompt");
    let catalogs = CatalogSet::builtin().expect("builtin catalogs");
    let entry = catalogs
        .get(language)
        .entries()
        .iter()
        .find(|e| match quiz["direction"].as_str() {
            Some("reverse") => e.translation == prompt,
            _ => e.term == prompt,
        })
        .expect("prompt comes from the catalog")
        .clone();
    match quiz["direction"].as_str() {
        Some("reverse") => entry.term,
        _ => entry.translation,
    }
}

pub fn wrong_option(quiz: &Value) -> String {
    let correct = correct_option(quiz);
    quiz["options"]
        .as_array()
        .expect("options")
        .iter()
        .filter_map(Value::as_str)
        .find(|o| *o != correct)
        .expect("at least one distractor")
        .to_string()
}

pub async fn current_quiz(app: &Router) -> Value {
    let (status, body) = call(app, Method::GET, "/api/quiz", None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"].clone()
}

/// Answers the current word (right or wrong) and moves on. Returns the answer payload.
pub async fn answer_and_advance(app: &Router, correct: bool) -> Value {
    let quiz = current_quiz(app).await;
    let answer = if correct {
        correct_option(&quiz)
    } else {
        wrong_option(&quiz)
    };
    let (status, body) = call(
        app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": answer })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(app, Method::POST, "/api/quiz/advance", None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"].clone()
}
