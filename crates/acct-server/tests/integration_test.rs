//! Integration tests for acct-server.
//!
//! Each test starts the gateway on an ephemeral port over a fresh data
//! directory and talks to it with a real HTTP client.

use std::fs;
use std::net::SocketAddr;

use acct_server::{CancellationToken, DEFAULT_SHUTDOWN_TIMEOUT, serve};
use acct_store::{AccountService, FileStore};
use reqwest::StatusCode;
use reqwest::header::LOCATION;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const USER: &str = r#"{"login":"user1234","name":"Anonymous","sex":"Male","birthday":"2000-01-01","password":"qwerty"}"#;

struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
    temp_dir: tempfile::TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            serve(
                listener,
                AccountService::new(store),
                token,
                DEFAULT_SHUTDOWN_TIMEOUT,
            )
            .await
            .unwrap();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            shutdown,
            handle,
            temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn post(&self, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/accounts"))
            .body(body.to_owned())
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, login: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/accounts/{login}")))
            .send()
            .await
            .unwrap()
    }

    async fn put(&self, login: &str, body: &str) -> reqwest::Response {
        self.client
            .put(self.url(&format!("/accounts/{login}")))
            .body(body.to_owned())
            .send()
            .await
            .unwrap()
    }

    async fn delete(&self, login: &str) -> reqwest::Response {
        self.client
            .delete(self.url(&format!("/accounts/{login}")))
            .send()
            .await
            .unwrap()
    }

    async fn stop(self) {
        self.shutdown.cancel();
        self.handle.await.unwrap();
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_create_then_read() {
    let server = TestServer::start().await;

    let response = server.post(USER).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[LOCATION].to_str().unwrap(),
        "/accounts/user1234"
    );
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["name"], "Anonymous");

    let response = server.get("user1234").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), USER);

    server.stop().await;
}

#[tokio::test]
async fn test_rejected_documents() {
    let server = TestServer::start().await;

    let cases = [
        ("", "input is empty"),
        ("[1, 2]", "malformed"),
        (r#"{"login":"bob","name":"Bob"}"#, "missing fields"),
        (
            r#"{"login":"lo g in","name":"","sex":"Male","birthday":"2000-01-01","password":""}"#,
            "invalid login",
        ),
    ];
    for (body, expected) in cases {
        let response = server.post(body).await;
        assert_eq!(
            response.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "body {body:?}"
        );
        assert!(error_message(response).await.contains(expected));
    }
    assert_eq!(fs::read_dir(server.temp_dir.path()).unwrap().count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_account() {
    let server = TestServer::start().await;

    assert_eq!(server.get("ghost").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        server.put("ghost", r#"{"name":"X"}"#).await.status(),
        StatusCode::NOT_FOUND
    );
    let response = server.delete("ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(response).await,
        "account ghost does not exist"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_partial_update() {
    let server = TestServer::start().await;
    server.post(USER).await;

    let response = server.put("user1234", r#"{"name":"Deanonymous"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(
        updated,
        json!({
            "login": "user1234",
            "name": "Deanonymous",
            "sex": "Male",
            "birthday": "2000-01-01",
            "password": "qwerty",
        })
    );

    let response = server.put("user1234", r#"{"sex":"Undefined"}"#).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let stored: Value = server.get("user1234").await.json().await.unwrap();
    assert_eq!(stored["sex"], "Male");

    server.stop().await;
}

#[tokio::test]
async fn test_rename() {
    let server = TestServer::start().await;
    server.post(USER).await;

    let response = server.put("user1234", r#"{"login":"anon"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(server.get("anon").await.status(), StatusCode::OK);
    assert_eq!(server.get("user1234").await.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_rename_conflict() {
    let server = TestServer::start().await;
    server.post(USER).await;
    server
        .post(r#"{"login":"taken","name":"T","sex":"Female","birthday":"1990-05-05","password":"x"}"#)
        .await;

    let response = server.put("user1234", r#"{"login":"taken"}"#).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let taken: Value = server.get("taken").await.json().await.unwrap();
    assert_eq!(taken["name"], "T");
    assert_eq!(server.get("user1234").await.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_delete() {
    let server = TestServer::start().await;
    server.post(USER).await;

    let response = server.delete("user1234").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(server.get("user1234").await.status(), StatusCode::NOT_FOUND);
    assert!(!server.temp_dir.path().join("user1234.json").exists());

    server.stop().await;
}

#[tokio::test]
async fn test_corrupted_record_is_opaque() {
    let server = TestServer::start().await;
    fs::write(server.temp_dir.path().join("bob.json"), "hunter2 hunter2").unwrap();

    let response = server.get("bob").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = error_message(response).await;
    assert!(message.contains("corrupted"));
    assert!(!message.contains("hunter2"));

    server.stop().await;
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = TestServer::start().await;
    let addr = server.addr;
    server.stop().await;

    let result = reqwest::Client::new()
        .get(format!("http://{addr}/accounts/anyone"))
        .send()
        .await;
    assert!(result.is_err());
}
