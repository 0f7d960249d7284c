// json api tests against a server on an ephemeral port

use glossa::{Dispatcher, REFUSAL_MESSAGE, Server, WordLookup, WordNet};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;

async fn spawn(dispatcher: Dispatcher) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Server::router(Arc::new(dispatcher));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn with_wordnet() -> Dispatcher {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wordnet");
    Dispatcher::new().with_words(WordLookup::new(Arc::new(WordNet::load(&dir).unwrap())))
}

#[tokio::test]
async fn test_health() {
    let base = spawn(Dispatcher::new()).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok", "online": false }));
}

#[tokio::test]
async fn test_define() {
    let base = spawn(with_wordnet()).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/define"))
        .json(&json!({ "word": "Cat" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["word"], "cat");
    assert_eq!(body["part_of_speech"], "noun");
    assert_eq!(body["synonyms"], json!(["true cat", "bozo", "guy"]));
}

#[tokio::test]
async fn test_refusal_is_bad_request() {
    let base = spawn(with_wordnet()).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/define"))
        .json(&json!({ "word": "bomb" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": REFUSAL_MESSAGE }));
}

#[tokio::test]
async fn test_describe_missing_file() {
    let base = spawn(Dispatcher::new()).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/describe"))
        .json(&json!({ "path": "/no/such/cat.jpg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "unknown");
    assert!(body.get("confidence").is_none());
}
