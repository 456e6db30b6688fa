//! Study library: cached reads, invalidating mutations, retries

use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use studyreel::client::{Library, QueryKey};
use studyreel::shared::models::Summary;
use studyreel::shared::ClientError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api_for, bearer, flashcard_json, session, summary_json};

#[tokio::test]
async fn test_summaries_are_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary_json("s1")])))
        .expect(1)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let first = library.summaries(&session()).await.unwrap();
    let second = library.summaries(&session()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].channel_title, "Fireship");
    assert!(library.is_cached(&QueryKey::Summaries));
}

#[tokio::test]
async fn test_summaries_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary_json("s1")])))
        .expect(1)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let summaries = library.summaries(&session()).await.unwrap();
    assert_eq!(summaries.len(), 1);
}

#[tokio::test]
async fn test_summaries_give_up_after_second_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let err = library.summaries(&session()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to fetch summaries.");
    assert!(!library.is_cached(&QueryKey::Summaries));
}

#[tokio::test]
async fn test_unauthorized_summaries_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .expect(1)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let err = library.summaries(&session()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Token expired");
}

#[tokio::test]
async fn test_create_summary_invalidates_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/summaries"))
        .and(body_json(json!({ "youtubeUrl": "https://youtu.be/abc" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(summary_json("s2")))
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    library.summaries(&session()).await.unwrap();
    assert!(library.is_cached(&QueryKey::Summaries));

    let created = library
        .create_summary(&session(), "  https://youtu.be/abc ")
        .await
        .unwrap();

    assert_eq!(created.id, "s2");
    assert!(!library.is_cached(&QueryKey::Summaries));
    assert!(library.is_cached(&QueryKey::Summary("s2".to_string())));
}

#[tokio::test]
async fn test_blank_video_link_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(201).set_body_json(summary_json("s2")))
        .expect(0)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let err = library.create_summary(&session(), "   ").await.unwrap_err();
    assert_matches!(err, ClientError::Fetch { status: None, .. });
}

#[tokio::test]
async fn test_generate_quiz_invalidates_quiz_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "q1", "title": "Old quiz", "createdAt": "2024-05-01T10:00:00Z" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/generate"))
        .and(body_json(json!({ "summaryId": "s1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "q2",
            "title": "New quiz",
            "questions": []
        })))
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let quizzes = library.quizzes(&session()).await.unwrap();
    assert!(quizzes[0].created_at.is_some());

    let quiz = library.generate_quiz(&session(), "s1").await.unwrap();
    assert_eq!(quiz.id, "q2");
    assert!(!library.is_cached(&QueryKey::Quizzes));
}

#[tokio::test]
async fn test_delete_flashcards_drops_cached_cards() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/flashcards/summary/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([flashcard_json("f1", "s1")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/flashcards/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flashcard_json("f1", "s1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/flashcards/f9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flashcard_json("f9", "s9")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/flashcards/summary/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let cards = library.flashcards(&session(), "s1").await.unwrap();
    assert_eq!(cards[0].category, "Basics");
    library.flashcard(&session(), "f1").await.unwrap();
    library.flashcard(&session(), "f9").await.unwrap();

    library.delete_flashcards(&session(), "s1").await.unwrap();

    assert!(!library.is_cached(&QueryKey::Flashcards("s1".to_string())));
    assert!(!library.is_cached(&QueryKey::Flashcard("f1".to_string())));
    assert!(library.is_cached(&QueryKey::Flashcard("f9".to_string())));
}

#[tokio::test]
async fn test_export_pdf_names_file_after_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pdf/generate-pdf"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 fake".to_vec()),
        )
        .mount(&server)
        .await;

    let summary: Summary = serde_json::from_value(summary_json("s1")).unwrap();
    let library = Library::new(api_for(&server));
    let export = library.export_pdf(&session(), &summary).await.unwrap();

    assert_eq!(export.file_name, "Rust_in_100_Seconds.pdf");
    assert_eq!(export.bytes, b"%PDF-1.7 fake".to_vec());

    let dir = tempfile::tempdir().unwrap();
    let saved = export.save_to(dir.path()).unwrap();
    assert_eq!(std::fs::read(saved).unwrap(), b"%PDF-1.7 fake");
}

#[tokio::test]
async fn test_clear_cache_forgets_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    library.summaries(&session()).await.unwrap();
    library.clear_cache();
    library.summaries(&session()).await.unwrap();
}

#[tokio::test]
async fn test_clear_cache_discards_in_flight_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([summary_json("s1")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let read = {
        let library = library.clone();
        tokio::spawn(async move { library.summaries(&session()).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    library.clear_cache();

    let summaries = read.await.unwrap().unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(!library.is_cached(&QueryKey::Summaries));
}

#[tokio::test]
async fn test_invalidation_discards_in_flight_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let library = Library::new(api_for(&server));
    let read = {
        let library = library.clone();
        tokio::spawn(async move { library.quizzes(&session()).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    library.invalidate(&QueryKey::Quizzes).await;

    read.await.unwrap().unwrap();
    assert!(!library.is_cached(&QueryKey::Quizzes));
}
