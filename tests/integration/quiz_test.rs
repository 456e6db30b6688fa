//! Quiz page lifecycle against a mocked quiz endpoint

use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use studyreel::client::{fetch_quiz, Advance, QuizPage, QuizPhase, QuizResult, Selection};
use studyreel::shared::ClientError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api_for, bearer, empty_quiz_json, quiz_json, session, unreachable_api};

async fn quiz_server(id: &str, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/quiz/{}", id)))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_correct_answer_scenario() {
    let server = quiz_server("q1", quiz_json("q1")).await;
    let api = api_for(&server);

    let mut page = QuizPage::new("q1");
    assert_eq!(page.phase(), QuizPhase::Loading);

    page.load(&api, &session()).await;
    assert_eq!(page.phase(), QuizPhase::Ready { index: 0 });

    assert_eq!(page.select_answer("4"), Selection::Recorded { correct: true });
    let run = page.run().unwrap();
    assert_eq!(run.is_correct(), Some(true));
    assert_eq!(run.score(), 1);

    let done = QuizResult { score: 1, total: 1 };
    assert_eq!(page.advance(), Advance::Finished(done));
    assert_eq!(page.phase(), QuizPhase::Finished(done));
}

#[tokio::test]
async fn test_wrong_answer_scenario() {
    let server = quiz_server("q1", quiz_json("q1")).await;
    let api = api_for(&server);

    let mut page = QuizPage::new("q1");
    page.load(&api, &session()).await;

    assert_eq!(page.select_answer("3"), Selection::Recorded { correct: false });
    assert_eq!(page.run().unwrap().score(), 0);
    assert_eq!(
        page.advance(),
        Advance::Finished(QuizResult { score: 0, total: 1 })
    );
}

#[tokio::test]
async fn test_empty_quiz_finishes_on_load() {
    let server = quiz_server("empty", empty_quiz_json("empty")).await;
    let api = api_for(&server);

    let mut page = QuizPage::new("empty");
    page.load(&api, &session()).await;

    assert_eq!(
        page.phase(),
        QuizPhase::Finished(QuizResult { score: 0, total: 0 })
    );
    assert_eq!(page.advance(), Advance::AlreadyFinished);
}

#[tokio::test]
async fn test_load_failure_shows_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let api = api_for(&server);

    let mut page = QuizPage::new("missing");
    page.load(&api, &session()).await;

    assert_eq!(
        page.phase(),
        QuizPhase::Error("Failed to fetch quiz data.".to_string())
    );
    assert_eq!(page.select_answer("4"), Selection::Ignored);
}

#[tokio::test]
async fn test_leaving_cancels_in_flight_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(quiz_json("slow"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let api = api_for(&server);

    let mut page = QuizPage::new("slow");
    let cancel = page.cancel_token();
    let fetch = {
        let api = api.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { fetch_quiz(&api, &session(), "slow", &cancel).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    page.leave();

    let result = tokio::time::timeout(Duration::from_secs(2), fetch)
        .await
        .expect("cancelled fetch returns promptly")
        .unwrap();
    assert_matches!(result, Err(ClientError::Cancelled));

    page.resolve(result);
    assert_eq!(page.phase(), QuizPhase::Loading);
}

#[tokio::test]
async fn test_result_after_leaving_is_discarded() {
    let server = quiz_server("q1", quiz_json("q1")).await;
    let api = api_for(&server);

    let mut page = QuizPage::new("q1");
    let result = fetch_quiz(&api, &session(), "q1", &page.cancel_token()).await;
    assert!(result.is_ok());

    page.leave();
    page.resolve(result);
    assert_eq!(page.phase(), QuizPhase::Loading);
    assert!(page.run().is_none());
}

#[tokio::test]
async fn test_network_failure_shows_error() {
    let api = unreachable_api();

    let mut page = QuizPage::new("q1");
    page.load(&api, &session()).await;

    assert_matches!(page.phase(), QuizPhase::Error(message) if message.starts_with("Network error"));
    assert_eq!(page.advance(), Advance::Unanswered);
}
