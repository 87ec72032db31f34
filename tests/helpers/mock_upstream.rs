// ABOUTME: In-process stand-in for Ollama and the prompt registry, bound to an ephemeral port
// ABOUTME: Serves scripted replies and records the requests the relay sends upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Scripted status and body for one upstream endpoint
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Request observed by the mock
#[derive(Clone, Debug)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub body: Value,
}

struct Script {
    chat: Reply,
    generate: Reply,
    tags: Reply,
    registry: Reply,
    chat_requests: Vec<Recorded>,
    generate_requests: Vec<Recorded>,
    registry_requests: Vec<Recorded>,
    tags_calls: usize,
}

type Shared = Arc<Mutex<Script>>;

/// Mock upstream server; aborted on drop
pub struct MockUpstream {
    pub base_url: String,
    script: Shared,
    handle: JoinHandle<()>,
}

/// Ollama chat reply carrying `content` as the assistant message
pub fn ollama_chat_reply(content: &str) -> Value {
    json!({
        "model": "llama3.2",
        "created_at": "2025-01-01T00:00:00Z",
        "message": {"role": "assistant", "content": content},
        "done": true,
        "total_duration": 1_500_000_000_u64,
        "prompt_eval_count": 42,
        "eval_count": 128
    })
}

/// Registry payload holding a system and a user message
pub fn registry_reply(system: &str, user: &str) -> Value {
    json!({
        "params": {
            "prompt": {
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": user}
                ]
            }
        }
    })
}

impl MockUpstream {
    /// Start a mock with healthy defaults on `127.0.0.1:0`
    pub async fn start() -> Self {
        let script = Arc::new(Mutex::new(Script {
            chat: Reply::ok(ollama_chat_reply("{}")),
            generate: Reply::ok(json!({
                "model": "llama3.2",
                "created_at": "2025-01-01T00:00:00Z",
                "response": "Hello from the mock",
                "done": true
            })),
            tags: Reply::ok(json!({
                "models": [
                    {
                        "name": "llama3.2:latest",
                        "modified_at": "2025-01-01T00:00:00Z",
                        "size": 2_019_393_189_u64,
                        "digest": "a80c4f17acd5"
                    },
                    {"name": "qwen2.5:7b"}
                ]
            })),
            registry: Reply::ok(registry_reply(
                "You are a coach.",
                "Plan for age {{age}}, machines: {{available_machines}}",
            )),
            chat_requests: Vec::new(),
            generate_requests: Vec::new(),
            registry_requests: Vec::new(),
            tags_calls: 0,
        }));

        let app = Router::new()
            .route("/api/chat", post(chat))
            .route("/api/generate", post(generate))
            .route("/api/tags", get(tags))
            .route("/api/variants/configs/fetch", post(registry))
            .with_state(Arc::clone(&script));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Mock upstream has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock upstream failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            script,
            handle,
        }
    }

    pub fn set_chat(&self, reply: Reply) {
        self.script.lock().unwrap().chat = reply;
    }

    /// Reply to chat calls with `content` as the model output
    pub fn set_chat_content(&self, content: &str) {
        self.set_chat(Reply::ok(ollama_chat_reply(content)));
    }

    pub fn set_generate(&self, reply: Reply) {
        self.script.lock().unwrap().generate = reply;
    }

    pub fn set_tags(&self, reply: Reply) {
        self.script.lock().unwrap().tags = reply;
    }

    pub fn set_registry(&self, reply: Reply) {
        self.script.lock().unwrap().registry = reply;
    }

    pub fn chat_requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().chat_requests.clone()
    }

    pub fn generate_requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().generate_requests.clone()
    }

    pub fn registry_requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().registry_requests.clone()
    }

    pub fn tags_calls(&self) -> usize {
        self.script.lock().unwrap().tags_calls
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{addr}")
}

fn record(headers: &HeaderMap, body: Value) -> Recorded {
    Recorded {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    }
}

fn respond(reply: Reply) -> (StatusCode, Json<Value>) {
    (reply.status, Json(reply.body))
}

async fn chat(
    State(script): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let reply = {
        let mut script = script.lock().unwrap();
        script.chat_requests.push(record(&headers, body));
        script.chat.clone()
    };
    respond(reply)
}

async fn generate(
    State(script): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let reply = {
        let mut script = script.lock().unwrap();
        script.generate_requests.push(record(&headers, body));
        script.generate.clone()
    };
    respond(reply)
}

async fn tags(State(script): State<Shared>) -> (StatusCode, Json<Value>) {
    let reply = {
        let mut script = script.lock().unwrap();
        script.tags_calls += 1;
        script.tags.clone()
    };
    respond(reply)
}

async fn registry(
    State(script): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let reply = {
        let mut script = script.lock().unwrap();
        script.registry_requests.push(record(&headers, body));
        script.registry.clone()
    };
    respond(reply)
}
