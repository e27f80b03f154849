use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// One field of a multipart form (syllabus and submission uploads).
#[derive(Debug, Clone)]
pub enum Part {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        file_name: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

/// A campus API call, fully described so transports stay swappable.
/// The bearer token travels explicitly; nothing here reads ambient state.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Body,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            path: path.into(),
            token: None,
            body: Body::Empty,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> ApiRequest {
        ApiRequest {
            method: Method::Post,
            path: path.into(),
            token: None,
            body: Body::Json(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> ApiRequest {
        ApiRequest {
            method: Method::Put,
            path: path.into(),
            token: None,
            body: Body::Json(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> ApiRequest {
        ApiRequest {
            method: Method::Patch,
            path: path.into(),
            token: None,
            body: Body::Json(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> ApiRequest {
        ApiRequest {
            method: Method::Delete,
            path: path.into(),
            token: None,
            body: Body::Empty,
        }
    }

    pub fn post_multipart(path: impl Into<String>, parts: Vec<Part>) -> ApiRequest {
        ApiRequest {
            method: Method::Post,
            path: path.into(),
            token: None,
            body: Body::Multipart(parts),
        }
    }

    pub fn token(mut self, token: &str) -> ApiRequest {
        self.token = Some(token.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub payload: Value,
}

/// Seam between services and the wire. Production uses reqwest; tests
/// script responses through the same trait.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> anyhow::Result<HttpTransport> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpTransport {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let call_id = Uuid::new_v4();
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(body) => builder.json(&body),
            Body::Multipart(parts) => builder.multipart(build_form(parts)),
        };

        tracing::debug!(
            call = %call_id,
            method = request.method.as_str(),
            path = %request.path,
            "api request"
        );
        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        // Non-JSON bodies become null; normalization decides what that means.
        let payload = response.json::<Value>().await.unwrap_or(Value::Null);
        tracing::debug!(call = %call_id, status, "api response");
        Ok(ApiResponse { status, payload })
    }
}

fn build_form(parts: Vec<Part>) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File {
                name,
                file_name,
                bytes,
            } => form.part(
                name,
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            ),
        };
    }
    form
}

fn map_send_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(error.to_string())
    }
}
