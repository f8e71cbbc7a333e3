// Scripted transport shared by the unit tests

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use sap_b1_client::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A request seen by the fake transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub target: String,
    pub body: Option<Value>,
    pub options: RequestOptions,
    pub cookie: Option<String>,
}

/// In-memory Service Layer: answers `Login` and scripted routes
pub struct FakeBackend {
    session_timeout: i64,
    logins: AtomicUsize,
    fail_login: AtomicBool,
    routes: Mutex<HashMap<String, Result<Value, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    settings: Mutex<Vec<TransportSettings>>,
    login_bodies: Mutex<Vec<Value>>,
    ticker: Mutex<Option<(MockClock, chrono::Duration)>>,
}

impl FakeBackend {
    pub fn new(session_timeout: i64) -> Arc<Self> {
        Arc::new(Self {
            session_timeout,
            logins: AtomicUsize::new(0),
            fail_login: AtomicBool::new(false),
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            settings: Mutex::new(Vec::new()),
            login_bodies: Mutex::new(Vec::new()),
            ticker: Mutex::new(None),
        })
    }

    /// Moves `clock` forward by `step` after every non-login request
    pub fn tick_clock_per_request(&self, clock: &MockClock, step: chrono::Duration) {
        *self.ticker.lock().unwrap() = Some((clock.clone(), step));
    }

    pub fn route(&self, target: &str, response: Result<Value, TransportError>) {
        self.routes
            .lock()
            .unwrap()
            .insert(target.to_string(), response);
    }

    pub fn fail_logins(&self, fail: bool) {
        self.fail_login.store(fail, Ordering::SeqCst);
    }

    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn built_settings(&self) -> Vec<TransportSettings> {
        self.settings.lock().unwrap().clone()
    }

    pub fn login_bodies(&self) -> Vec<Value> {
        self.login_bodies.lock().unwrap().clone()
    }
}

pub struct FakeFactory(pub Arc<FakeBackend>);

impl TransportFactory for FakeFactory {
    fn build(&self, settings: TransportSettings) -> Result<Arc<dyn Transport>, AppError> {
        self.0.settings.lock().unwrap().push(settings);
        Ok(Arc::new(FakeTransport {
            backend: self.0.clone(),
            cookie: Mutex::new(None),
        }))
    }
}

struct FakeTransport {
    backend: Arc<FakeBackend>,
    cookie: Mutex<Option<String>>,
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        let backend = &self.backend;

        if target == "Login" {
            let n = backend.logins.fetch_add(1, Ordering::SeqCst) + 1;
            backend
                .login_bodies
                .lock()
                .unwrap()
                .push(body.cloned().unwrap_or(Value::Null));
            if backend.fail_login.load(Ordering::SeqCst) {
                return Err(status_error(
                    401,
                    "Login",
                    r#"{"error":{"code":-304,"message":{"value":"Fail to get DB Credentials"}}}"#,
                ));
            }
            return Ok(json!({
                "SessionId": format!("session-{n}"),
                "SessionTimeout": backend.session_timeout,
            }));
        }

        backend.requests.lock().unwrap().push(RecordedRequest {
            method,
            target: target.to_string(),
            body: body.cloned(),
            options: options.clone(),
            cookie: self.cookie.lock().unwrap().clone(),
        });

        if let Some((clock, step)) = backend.ticker.lock().unwrap().as_ref() {
            clock.advance(*step);
        }

        backend
            .routes
            .lock()
            .unwrap()
            .get(target)
            .cloned()
            .unwrap_or_else(|| Err(status_error(404, target, "not found")))
    }

    async fn attach_cookie(&self, cookie: String) {
        *self.cookie.lock().unwrap() = Some(cookie);
    }
}

pub fn status_error(status: u16, path: &str, body: &str) -> TransportError {
    TransportError::Status {
        status: StatusCode::from_u16(status).unwrap(),
        path: path.to_string(),
        headers: HeaderMap::new(),
        body: body.to_string(),
    }
}

pub fn test_config() -> Config {
    Config {
        host: "https://sap.local".to_string(),
        port: 50000,
        version: "v2".to_string(),
        company: "SBODEMO".to_string(),
        username: "manager".to_string(),
        password: "secret".to_string(),
        debug: true,
    }
}

pub fn fake_client(backend: &Arc<FakeBackend>, clock: &MockClock) -> Client {
    Client::with_parts(
        test_config(),
        Arc::new(clock.clone()),
        Arc::new(FakeFactory(backend.clone())),
    )
}
