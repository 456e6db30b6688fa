//! Session container against a mocked auth backend and real storage

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use studyreel::client::session::{TOKEN_KEY, USER_KEY};
use studyreel::client::{FileStore, KeyValueStore, MemoryStore, SessionStore};
use studyreel::shared::ClientError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api_for, auth_json, unreachable_api, user, user_json};

#[tokio::test]
async fn test_sign_in_establishes_and_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "u1@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_json("tok-1", "u1")))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut store = SessionStore::init(MemoryStore::new());

    let session = store.sign_in(&api, "u1@example.com", "hunter2").await.unwrap();
    assert_eq!(session.token, "tok-1");
    assert_eq!(session.user, user("u1"));

    assert!(store.is_authenticated());
    assert_eq!(store.token(), Some("tok-1"));
    assert_eq!(store.store().get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
    assert!(store.store().contains(USER_KEY));
}

#[tokio::test]
async fn test_rejected_sign_in_leaves_state_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut store = SessionStore::init(MemoryStore::new());

    let err = store.sign_in(&api, "u1@example.com", "wrong").await.unwrap_err();
    assert_matches!(err, ClientError::Authentication { ref message } if message == "Invalid credentials");
    assert!(store.user().is_none());
    assert!(store.token().is_none());
    assert!(store.store().is_empty());
}

#[tokio::test]
async fn test_rejected_sign_in_keeps_previous_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut store = SessionStore::init(MemoryStore::new());
    store.establish_session(user("u1"), "old".to_string()).unwrap();

    let err = store.sign_in(&api, "u2@example.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
    assert_eq!(store.token(), Some("old"));
    assert_eq!(store.user(), Some(&user("u1")));
}

#[tokio::test]
async fn test_sign_up_uses_register_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "email": "u9@example.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_json("tok-9", "u9")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut store = SessionStore::init(MemoryStore::new());

    let session = store.sign_up(&api, "Ada Lovelace", "u9@example.com", "pw").await.unwrap();
    assert_eq!(session.user.id, "u9");
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn test_failed_sign_up_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut store = SessionStore::init(MemoryStore::new());

    let err = store.sign_up(&api, "Ada", "a@example.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Registration failed");
    assert!(!store.is_authenticated());
}

#[test]
fn test_sign_out_clears_everything() {
    let mut store = SessionStore::init(MemoryStore::new());
    store.establish_session(user("u1"), "tok".to_string()).unwrap();

    store.sign_out();

    assert!(store.user().is_none());
    assert!(store.token().is_none());
    assert!(store.store().is_empty());

    // Signing out twice is harmless
    store.sign_out();
    assert!(store.store().is_empty());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_json("tok-1", "u1")))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let api = api_for(&server);

    let signed_in = {
        let mut store = SessionStore::init(FileStore::open(&file).unwrap());
        store.sign_in(&api, "u1@example.com", "pw").await.unwrap().clone()
    };

    let restored = SessionStore::init(FileStore::open(&file).unwrap());
    assert_eq!(restored.session(), Some(&signed_in));
}

#[test]
fn test_sign_out_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let mut store = SessionStore::init(FileStore::open(&file).unwrap());
    store.establish_session(user("u1"), "tok".to_string()).unwrap();
    store.sign_out();

    let restored = SessionStore::init(FileStore::open(&file).unwrap());
    assert!(!restored.is_authenticated());
    assert_eq!(restored.store().get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_corrupt_user_record_fails_closed_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    {
        let mut raw = FileStore::open(&file).unwrap();
        raw.set(TOKEN_KEY, "tok").unwrap();
        raw.set(USER_KEY, "{not json").unwrap();
    }

    let store = SessionStore::init(FileStore::open(&file).unwrap());
    assert!(store.session().is_none());

    let reopened = FileStore::open(&file).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(reopened.get(USER_KEY).unwrap(), None);
}

#[test]
fn test_oauth_redirect_establishes_session() {
    let user = user_json("u5").to_string();
    let mut url = reqwest::Url::parse("studyreel://auth/success").unwrap();
    url.query_pairs_mut()
        .append_pair("token", "tok-5")
        .append_pair("user", &user);

    let mut store = SessionStore::init(MemoryStore::new());
    let session = store.complete_redirect(url.as_str()).unwrap();

    assert_eq!(session.token, "tok-5");
    assert_eq!(session.user.id, "u5");
    assert!(store.store().contains(TOKEN_KEY));
}

#[test]
fn test_oauth_redirect_without_user_is_rejected() {
    let mut store = SessionStore::init(MemoryStore::new());
    let err = store
        .complete_redirect("studyreel://auth/success?token=tok-5")
        .unwrap_err();

    assert_matches!(err, ClientError::Authentication { .. });
    assert!(store.session().is_none());
    assert!(store.store().is_empty());
}

#[tokio::test]
async fn test_sign_in_network_failure_leaves_state_unchanged() {
    let api = unreachable_api();
    let mut store = SessionStore::init(MemoryStore::new());
    store.establish_session(user("u1"), "old".to_string()).unwrap();

    let err = store.sign_in(&api, "u2@example.com", "pw").await.unwrap_err();

    assert_matches!(err, ClientError::Authentication { ref message } if message.starts_with("Network error"));
    assert_eq!(store.token(), Some("old"));
    assert_eq!(store.user(), Some(&user("u1")));
}

#[tokio::test]
async fn test_sign_up_network_failure_stays_signed_out() {
    let api = unreachable_api();
    let mut store = SessionStore::init(MemoryStore::new());

    let err = store.sign_up(&api, "Ada", "a@example.com", "pw").await.unwrap_err();

    assert_matches!(err, ClientError::Authentication { .. });
    assert!(!store.is_authenticated());
    assert!(store.store().is_empty());
}
