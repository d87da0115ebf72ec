//! Canned-response HTTP server for integration testing.
//!
//! Tests register routes with fixed JSON responses, point a `Client` at
//! `base_url()`, and afterwards inspect every request the client made
//! (method, path, body). The background mark-as-read `PUT` arrives on its
//! own schedule, so [`FakeMailServer::wait_for`] polls for it.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

type Routes = HashMap<(String, String), (u16, String)>;

pub struct FakeMailServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    routes: Arc<Mutex<Routes>>,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
}

impl FakeMailServer {
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind fake server"));
        let port = server.server_addr().port();

        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();
        let routes: Arc<Mutex<Routes>> = Arc::default();

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            let routes = Arc::clone(&routes);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let method = request.method().to_string();
                    let path = request.url().to_string();
                    requests.lock().unwrap().push(RecordedRequest {
                        method: method.clone(),
                        path: path.clone(),
                        body,
                    });

                    let canned = routes.lock().unwrap().get(&(method, path)).cloned();
                    let (status, payload) = canned
                        .unwrap_or_else(|| (404, r#"{"error": "not found"}"#.to_string()));
                    let response = Response::from_string(payload)
                        .with_status_code(status)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
            routes,
            server,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Serve `status`/`body` for every `method path` request from now on.
    pub fn route(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_matching(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Poll until at least one `method path` request lands or the timeout
    /// passes. Returns whether one landed.
    pub fn wait_for(&self, method: &str, path: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if !self.requests_matching(method, path).is_empty() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }
}

impl Drop for FakeMailServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
