//! Test utilities for hearth-core
//!
//! This module provides a mock OpenAI-compatible chat server that can be used
//! for development and integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// How the mock server answers chat completions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Echo,
    Failing,
    EmptyChoices,
}

/// A chat completion request as received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request body as JSON
    pub body: Value,
    /// Value of the `Authorization` header, if any
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct MockState {
    mode: Mode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock OpenAI-compatible server for testing and development
pub struct MockChatServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockChatServer {
    /// Start a server that echoes the last user message
    pub async fn start() -> Self {
        Self::start_with_mode(Mode::Echo).await
    }

    /// Start a server whose chat endpoint always returns 500
    pub async fn failing() -> Self {
        Self::start_with_mode(Mode::Failing).await
    }

    /// Start a server that answers with an empty `choices` array
    pub async fn empty_choices() -> Self {
        Self::start_with_mode(Mode::EmptyChoices).await
    }

    async fn start_with_mode(mode: Mode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            mode,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Chat completion requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockChatServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Model list endpoint (health check)
async fn handle_models() -> Json<Value> {
    Json(json!({
        "object": "list",
        "data": [{ "id": "test-model", "object": "model" }]
    }))
}

/// Chat completions endpoint
async fn handle_chat(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let question = body["messages"]
        .as_array()
        .and_then(|msgs| msgs.iter().rev().find(|m| m["role"] == "user"))
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default()
        .to_string();
    let model = body["model"].as_str().unwrap_or("test-model").to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        body,
        authorization,
    });

    match state.mode {
        Mode::Failing => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        Mode::EmptyChoices => Json(json!({ "model": model, "choices": [] })).into_response(),
        Mode::Echo => Json(json!({
            "model": model,
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": format!("You asked: {}", question)
                },
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
    }
}
