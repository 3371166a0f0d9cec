#![allow(dead_code)]

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

pub type Resolver = dyn Fn(&str, &serde_json::Value) -> serde_json::Value + Send + Sync;

type CallLog = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

#[derive(Clone)]
struct StubState {
    resolver: Arc<Resolver>,
    calls: CallLog,
}

/// GraphQL stub served by axum on its own runtime thread. Requests are
/// answered by `operationName`.
pub struct StubServer {
    pub url: String,
    pub calls: CallLog,
}

async fn graphql(
    State(stub): State<StubState>,
    Json(req): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let name = req["operationName"].as_str().unwrap_or_default().to_string();
    let variables = req["variables"].clone();
    stub.calls
        .lock()
        .expect("calls lock")
        .push((name.clone(), variables.clone()));
    Json((stub.resolver)(&name, &variables))
}

impl StubServer {
    pub fn start(resolver: Arc<Resolver>) -> Self {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            resolver,
            calls: calls.clone(),
        };
        let (addr_tx, addr_rx) = mpsc::channel();
        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("stub runtime");
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind stub");
                addr_tx
                    .send(listener.local_addr().expect("stub addr"))
                    .expect("report stub addr");
                let app = Router::new()
                    .route("/graphql", post(graphql))
                    .with_state(state);
                axum::serve(listener, app).await.expect("serve stub");
            });
        });
        let addr = addr_rx.recv().expect("stub addr");
        Self {
            url: format!("http://{addr}/graphql"),
            calls,
        }
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

pub struct Sidecar {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    events: VecDeque<serde_json::Value>,
}

impl Sidecar {
    pub fn spawn() -> Self {
        let exe = env!("CARGO_BIN_EXE_schoold");
        let mut child = Command::new(exe)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn schoold");
        let stdin = child.stdin.take().expect("child stdin");
        let stdout = child.stdout.take().expect("child stdout");
        Self {
            child,
            stdin,
            reader: BufReader::new(stdout),
            events: VecDeque::new(),
        }
    }

    fn read_value(&mut self) -> serde_json::Value {
        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .expect("read response line");
        assert!(!line.trim().is_empty(), "sidecar closed stdout");
        serde_json::from_str(line.trim()).expect("parse response json")
    }

    /// Sends a request and returns its response; events seen meanwhile are kept.
    pub fn request(&mut self, id: &str, method: &str, params: serde_json::Value) -> serde_json::Value {
        let payload = json!({ "id": id, "method": method, "params": params });
        writeln!(self.stdin, "{}", payload).expect("write request");
        self.stdin.flush().expect("flush request");
        loop {
            let value = self.read_value();
            if value.get("event").is_some() {
                self.events.push_back(value);
                continue;
            }
            assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
            return value;
        }
    }

    /// Writes one raw line and returns the next non-event reply.
    pub fn send_raw(&mut self, line: &str) -> serde_json::Value {
        writeln!(self.stdin, "{}", line).expect("write raw line");
        self.stdin.flush().expect("flush raw line");
        loop {
            let value = self.read_value();
            if value.get("event").is_some() {
                self.events.push_back(value);
                continue;
            }
            return value;
        }
    }

    pub fn request_ok(&mut self, id: &str, method: &str, params: serde_json::Value) -> serde_json::Value {
        let value = self.request(id, method, params);
        assert!(
            value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
            "{} failed: {}",
            method,
            value
        );
        value.get("result").cloned().unwrap_or_else(|| json!({}))
    }

    /// Next event for `screen_id`, in arrival order.
    pub fn next_event(&mut self, screen_id: &str) -> serde_json::Value {
        if let Some(pos) = self
            .events
            .iter()
            .position(|e| e["screenId"].as_str() == Some(screen_id))
        {
            return self.events.remove(pos).expect("queued event");
        }
        loop {
            let value = self.read_value();
            if value["screenId"].as_str() == Some(screen_id) && value.get("event").is_some() {
                return value;
            }
            if value.get("event").is_some() {
                self.events.push_back(value);
            }
        }
    }

    /// Skips events until the screen settles into ready or error.
    pub fn settled_view(&mut self, screen_id: &str) -> serde_json::Value {
        loop {
            let ev = self.next_event(screen_id);
            let state = ev["view"]["state"].as_str().unwrap_or("");
            if state == "ready" || state == "error" {
                return ev["view"].clone();
            }
        }
    }

    pub fn shutdown(mut self) {
        drop(self.stdin);
        let _ = self.child.wait();
    }
}

pub fn card_titles(view: &serde_json::Value) -> Vec<String> {
    view["nodes"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|n| n["type"] == "card")
        .filter_map(|n| n["title"].as_str().map(str::to_string))
        .collect()
}
