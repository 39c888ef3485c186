use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use lastos_api::{ApiClient, ApiConfig};
use lastos_core::context::SessionContext;

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    /// Parsed JSON body, `Value::Null` when empty.
    pub body: Value,
}

#[derive(Default)]
pub struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    /// When set, `/state` answers 502 with a plain-text body.
    fail_state: AtomicBool,
    state_calls: AtomicU32,
}

/// In-process stand-in for the game backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            state,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self, context: SessionContext) -> ApiClient {
        ApiClient::new(&ApiConfig::with_base(self.base_url()), context).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn set_fail_state(&self, fail: bool) {
        self.state.fail_state.store(fail, Ordering::SeqCst);
    }

    pub fn state_calls(&self) -> u32 {
        self.state.state_calls.load(Ordering::SeqCst)
    }
}

/// A client URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: parsed.clone(),
    });

    let segments: Vec<&str> = uri.path().trim_start_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["api", "auth", "verify"]) => ok(json!({
            "success": true,
            "uid": format!("uid-for-{}", parsed["idToken"].as_str().unwrap_or("")),
        })),
        ("POST", ["api", "auth", "register"]) => ok(json!({
            "success": true,
            "userId": "u-7",
            "message": format!("Registered {}", parsed["displayName"].as_str().unwrap_or("")),
            "tempPassword": "hunter2",
        })),
        ("POST", ["api", "session", "create"]) => ok(json!({
            "success": true,
            "sessionId": "s-100",
            "session": {
                "id": "s-100",
                "status": "waiting",
                "currentRound": 0,
                "globalHealth": 100,
                "createdAt": 1_760_000_000_000u64,
                "medianScore": 0,
            },
        })),
        (_, ["api", "session", "missing", ..]) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "Session not found" })),
        )
            .into_response(),
        ("POST", ["api", "session", _, "join"]) => ok(json!({ "success": true, "playerCount": 4 })),
        ("POST", ["api", "session", _, "start"]) => ok(json!({
            "success": true,
            "roles": { "u-1": "citizen", "u-2": "attacker", "u-3": "authority", "u-4": "auditor" },
        })),
        ("POST", ["api", "session", _, "nextRound"]) => {
            ok(json!({ "success": true, "gameOver": false, "newRound": 2 }))
        },
        ("GET", ["api", "session", "garbled", "state"]) => ok(json!({ "unexpected": true })),
        ("GET", ["api", "session", _, "state"]) => {
            let call = state.state_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if state.fail_state.load(Ordering::SeqCst) {
                return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
            }
            ok(json!({
                "success": true,
                "globalHealth": 87.5,
                "currentRound": call,
                "status": "active",
                "playerRole": "citizen",
                "playerTrustScore": 0.9,
                "cooldownUntil": 0,
                "totalPlayers": 4,
            }))
        },
        ("GET", ["api", "session", _, "leaderboard"]) => ok(json!({
            "success": true,
            "leaderboard": [
                { "playerId": "u-1", "trustScore": 0.95, "role": "citizen" },
                { "playerId": "u-2", "trustScore": 0.4, "role": "attacker" },
            ],
        })),
        ("GET", ["api", "session", _, "minigame"]) => ok(json!({
            "success": true,
            "problemId": "p-9",
            "problem": {
                "type": "sensor_average",
                "problemId": 9,
                "instruction": "Average the readings",
                "readings": [1.0, 2.0, 3.0],
            },
            "timeLimit": 30,
        })),
        ("POST", ["api", "session", _, "minigame", "submit"]) => ok(json!({
            "success": true,
            "certificateId": "c-1",
            "score": parsed["answer"].as_f64().unwrap_or(0.0) * 10.0,
            "bufferTime": 5,
        })),
        ("GET", ["api", "session", _, "certificates", "pending"]) => ok(json!({
            "success": true,
            "certificates": [
                { "id": "c-1", "problemType": "sensor_average", "score": 80, "createdAt": 1 },
            ],
        })),
        ("POST", ["api", "session", _, "certificates", _, "process"]) => ok(json!({
            "success": true,
            "approved": parsed["action"] == "approve",
            "healthChange": -5,
            "winner": null,
        })),
        ("GET", ["api", "session", _, "ledger"]) => ok(json!({
            "success": true,
            "entries": [{
                "certificateId": "c-1",
                "playerId": "u-2",
                "authorityId": "u-3",
                "action": "approve",
                "score": 80,
                "wasInfected": true,
                "healthChange": -5,
                "timestamp": 2,
            }],
        })),
        ("POST", ["api", "session", _, "cooldown"]) => {
            ok(json!({ "success": true, "cooldownDuration": 60000 }))
        },
        _ => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "Not found" })),
        )
            .into_response(),
    }
}

fn ok(body: Value) -> Response {
    (StatusCode::OK, axum::Json(body)).into_response()
}
