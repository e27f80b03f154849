#![allow(dead_code)]

//! Shared scaffolding for the handler tests: a scripted transport standing
//! in for the campus API, plus state and request builders.

use async_trait::async_trait;
use campusd::api::{ApiRequest, ApiResponse, Body, Method, Part, Transport};
use campusd::config::Config;
use campusd::error::ApiError;
use campusd::ipc::{AppState, Request};
use campusd::model::{Role, User};
use campusd::session::Session;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// What a scripted route answers. Routes are keyed "METHOD path" and answer
/// the same way every time, so reload-after-mutation flows just work.
pub enum Scripted {
    Status(u16, Value),
    Timeout,
    Transport(&'static str),
}

/// One executed call, kept for asserting traffic or its absence.
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Body,
}

#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Arc<FakeTransport> {
        Arc::new(FakeTransport::default())
    }

    pub fn script(&self, route: &str, status: u16, payload: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Scripted::Status(status, payload));
    }

    pub fn script_timeout(&self, route: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Scripted::Timeout);
    }

    pub fn script_transport_error(&self, route: &str, message: &'static str) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Scripted::Transport(message));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, route: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| format!("{} {}", c.method.as_str(), c.path) == route)
            .count()
    }

    pub fn last_call(&self) -> Option<(String, Option<String>, Body)> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|c| {
                (
                    format!("{} {}", c.method.as_str(), c.path),
                    c.token.clone(),
                    c.body.clone(),
                )
            })
    }

    /// JSON body of the most recent call to `route`, if it had one.
    pub fn last_json_body(&self, route: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| format!("{} {}", c.method.as_str(), c.path) == route)
            .and_then(|c| match &c.body {
                Body::Json(v) => Some(v.clone()),
                _ => None,
            })
    }

    /// Multipart parts of the most recent call to `route`, if it had any.
    pub fn last_multipart_body(&self, route: &str) -> Option<Vec<Part>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| format!("{} {}", c.method.as_str(), c.path) == route)
            .and_then(|c| match &c.body {
                Body::Multipart(parts) => Some(parts.clone()),
                _ => None,
            })
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = format!("{} {}", request.method.as_str(), request.path);
        self.calls.lock().unwrap().push(Recorded {
            method: request.method,
            path: request.path.clone(),
            token: request.token.clone(),
            body: request.body.clone(),
        });
        match self.routes.lock().unwrap().get(&key) {
            Some(Scripted::Status(status, payload)) => Ok(ApiResponse {
                status: *status,
                payload: payload.clone(),
            }),
            Some(Scripted::Timeout) => Err(ApiError::Timeout),
            Some(Scripted::Transport(message)) => Err(ApiError::Transport(message.to_string())),
            None => Err(ApiError::api_status(404, format!("unscripted route: {key}"))),
        }
    }
}

pub fn temp_state_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

/// Fresh state over a scripted transport and its own state dir.
pub fn state(api: Arc<FakeTransport>, prefix: &str) -> AppState {
    let config = Config {
        api_url: "http://localhost:3001/api".to_string(),
        state_dir: temp_state_dir(prefix),
    };
    AppState::with_transport(config, api)
}

pub fn user(id: &str, role: Role) -> User {
    let (first, last) = match role {
        Role::Student => ("Sam", "Osei"),
        Role::Lecturer => ("Lena", "Vogel"),
        Role::Admin => ("Ada", "Byron"),
    };
    User {
        id: id.to_string(),
        email: format!("{}@campus.edu", first.to_lowercase()),
        role,
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
    }
}

/// Drop a live session into the state, as if sign-in already happened.
pub fn sign_in(state: &mut AppState, role: Role) {
    let id = match role {
        Role::Student => "20",
        Role::Lecturer => "7",
        Role::Admin => "1",
    };
    state.session = Some(Session::new("tok-test".to_string(), user(id, role)));
}

pub fn request(id: &str, method: &str, params: Value) -> Request {
    serde_json::from_value(json!({ "id": id, "method": method, "params": params }))
        .expect("request")
}

pub fn error_code(response: &Value) -> &str {
    response["error"]["code"].as_str().unwrap_or("")
}
