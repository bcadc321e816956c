mod common;

use std::collections::HashSet;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_app;
use common::http::{assert_json_error, assert_status_ok_json, call};
use common::quiz::{correct_option, current_quiz, wrong_option};

#[tokio::test]
async fn it_serves_a_question_without_revealing_the_answer() {
    let app = spawn_test_app().await;

    let (status, body) = call(&app.app, Method::GET, "/api/quiz", None).await;
    assert_status_ok_json(status, &body);

    let quiz = &body["data"];
    assert_eq!(quiz["language"], "en");
    assert_eq!(quiz["direction"], "forward");
    assert_eq!(quiz["position"], 0);
    assert_eq!(quiz["queueLength"], 42);
    assert!(quiz["correctAnswer"].is_null());
    assert!(quiz["isCorrect"].is_null());

    let options: Vec<&str> = quiz["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_str().unwrap())
        .collect();
    assert_eq!(options.len(), 6);
    assert_eq!(options.iter().collect::<HashSet<_>>().len(), 6);
    assert!(options.contains(&correct_option(quiz).as_str()));
}

#[tokio::test]
async fn it_records_a_correct_answer_and_updates_stats() {
    let app = spawn_test_app().await;
    let quiz = current_quiz(&app.app).await;
    let answer = correct_option(&quiz);

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": answer })),
    )
    .await;
    assert_status_ok_json(status, &body);

    let data = &body["data"];
    assert_eq!(data["recorded"], true);
    assert_eq!(data["isCorrect"], true);
    assert!(data.get("retryAt").is_none());
    assert_eq!(data["quiz"]["correctAnswer"], answer);
    assert_eq!(data["quiz"]["score"], 1);
    assert_eq!(data["quiz"]["total"], 1);
    assert_eq!(data["stats"]["totalAnswered"], 1);
    assert_eq!(data["stats"]["totalCorrect"], 1);
    assert_eq!(data["stats"]["accuracy"], 100);
    assert_eq!(data["stats"]["streak"], 1);
    assert_eq!(data["stats"]["today"]["count"], 1);
}

#[tokio::test]
async fn it_ignores_a_second_answer_to_the_same_question() {
    let app = spawn_test_app().await;
    let quiz = current_quiz(&app.app).await;
    let wrong = wrong_option(&quiz);

    call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": wrong })),
    )
    .await;
    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": correct_option(&quiz) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["recorded"], false);
    assert_eq!(data["isCorrect"], false);
    assert_eq!(data["quiz"]["selected"], wrong);
    assert_eq!(data["stats"]["totalAnswered"], 1);
}

#[tokio::test]
async fn it_schedules_a_wrong_answer_for_retry_later_in_the_cycle() {
    let app = spawn_test_app().await;
    let quiz = current_quiz(&app.app).await;
    let prompt = quiz["prompt"].as_str().unwrap().to_string();

    let (_, body) = call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": wrong_option(&quiz) })),
    )
    .await;
    let data = &body["data"];
    assert_eq!(data["isCorrect"], false);
    assert_eq!(data["quiz"]["queueLength"], 43);
    let retry_at = data["retryAt"].as_u64().expect("retry position");
    assert!((5..=11).contains(&retry_at), "retry at {retry_at}");

    let mut seen_again_at = None;
    for _ in 0..retry_at {
        let (status, step) = call(&app.app, Method::POST, "/api/quiz/advance", None).await;
        assert_eq!(status, StatusCode::OK);
        let quiz = &step["data"]["quiz"];
        if quiz["prompt"] == prompt.as_str() {
            seen_again_at = quiz["position"].as_u64();
            break;
        }
        let answer = correct_option(quiz);
        call(
            &app.app,
            Method::POST,
            "/api/quiz/answer",
            Some(json!({ "answer": answer })),
        )
        .await;
    }
    assert_eq!(seen_again_at, Some(retry_at));
}

#[tokio::test]
async fn it_advances_only_after_answer_and_skips_only_before() {
    let app = spawn_test_app().await;

    let (_, body) = call(&app.app, Method::POST, "/api/quiz/advance", None).await;
    assert_eq!(body["data"]["moved"], false);
    assert_eq!(body["data"]["quiz"]["position"], 0);

    let (_, body) = call(&app.app, Method::POST, "/api/quiz/skip", None).await;
    assert_eq!(body["data"]["moved"], true);
    assert_eq!(body["data"]["quiz"]["position"], 1);
    assert_eq!(body["data"]["quiz"]["total"], 0);

    let quiz = current_quiz(&app.app).await;
    call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": correct_option(&quiz) })),
    )
    .await;

    let (_, body) = call(&app.app, Method::POST, "/api/quiz/skip", None).await;
    assert_eq!(body["data"]["moved"], false);

    let (_, body) = call(&app.app, Method::POST, "/api/quiz/advance", None).await;
    assert_eq!(body["data"]["moved"], true);
    assert_eq!(body["data"]["quiz"]["position"], 2);
    assert!(body["data"]["quiz"]["selected"].is_null());
}

#[tokio::test]
async fn it_hint_hides_half_the_wrong_options_once() {
    let app = spawn_test_app().await;
    let quiz = current_quiz(&app.app).await;
    let correct = correct_option(&quiz);

    let (_, body) = call(&app.app, Method::POST, "/api/quiz/hint", None).await;
    assert_eq!(body["data"]["moved"], true);
    let eliminated = body["data"]["quiz"]["eliminated"].as_array().unwrap().clone();
    assert_eq!(eliminated.len(), 2);
    assert!(eliminated.iter().all(|e| e.as_str() != Some(correct.as_str())));

    let (_, body) = call(&app.app, Method::POST, "/api/quiz/hint", None).await;
    assert_eq!(body["data"]["moved"], false);
    assert_eq!(body["data"]["quiz"]["eliminated"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn it_reset_starts_a_fresh_round() {
    let app = spawn_test_app().await;
    common::quiz::answer_and_advance(&app.app, true).await;
    common::quiz::answer_and_advance(&app.app, false).await;

    let (status, body) = call(&app.app, Method::POST, "/api/quiz/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let quiz = &body["data"];
    assert_eq!(quiz["position"], 0);
    assert_eq!(quiz["score"], 0);
    assert_eq!(quiz["total"], 0);
    assert_eq!(quiz["queueLength"], 42);

    // Lifetime stats are not part of the round.
    let (_, stats) = call(&app.app, Method::GET, "/api/stats", None).await;
    assert_eq!(stats["data"]["totalAnswered"], 2);
}

#[tokio::test]
async fn it_rejects_empty_or_malformed_answers() {
    let app = spawn_test_app().await;

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "answer": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "EMPTY_ANSWER");

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/quiz/answer",
        Some(json!({ "choice": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "INVALID_REQUEST_BODY");
}
