pub mod envelope;
pub mod transport;

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod enrollments;

pub use transport::{ApiRequest, ApiResponse, Body, HttpTransport, Method, Part, Transport};

use crate::error::ApiError;
use serde_json::Value;

/// Run a call whose response carries the success envelope. The envelope
/// check comes before the status check so the server's own failure message
/// wins over a bare "HTTP 4xx".
pub(crate) async fn call(
    transport: &dyn Transport,
    request: ApiRequest,
    failure: &str,
) -> Result<Value, ApiError> {
    let response = transport.execute(request).await?;
    envelope::ensure_success(&response.payload, failure)?;
    if response.status >= 400 {
        return Err(status_error(response.status, &response.payload));
    }
    Ok(response.payload)
}

/// Collection reads skip the envelope failure check; shape tolerance takes
/// priority there. Error statuses still fail the read.
pub(crate) async fn call_list(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<Value, ApiError> {
    let response = transport.execute(request).await?;
    if response.status >= 400 {
        return Err(status_error(response.status, &response.payload));
    }
    Ok(response.payload)
}

fn status_error(status: u16, payload: &Value) -> ApiError {
    let message = payload
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"));
    ApiError::api_status(status, message)
}
