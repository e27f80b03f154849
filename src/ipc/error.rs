use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::validate::FieldError;

pub fn ok(id: &str, result: Value) -> Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

/// Success response whose result is a serializable view model.
pub fn ok_view<T: Serialize>(id: &str, result: &T) -> Value {
    ok(id, serde_json::to_value(result).unwrap_or(Value::Null))
}

pub fn err(id: &str, code: &str, message: impl Into<String>, details: Option<Value>) -> Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Map an API client failure onto the protocol taxonomy. The server's own
/// message travels as-is; the HTTP status rides along in details when known.
pub fn api_failure(id: &str, error: &ApiError) -> Value {
    let details = match error {
        ApiError::Api {
            status: Some(status),
            ..
        } => Some(json!({ "status": status })),
        _ => None,
    };
    err(id, error.code(), error.to_string(), details)
}

pub fn validation(id: &str, fields: &[FieldError]) -> Value {
    err(
        id,
        "validation_failed",
        "validation failed",
        Some(json!({ "fields": fields })),
    )
}

pub fn not_authenticated(id: &str) -> Value {
    err(
        id,
        "not_authenticated",
        "sign in first",
        Some(json!({ "redirect": "/login" })),
    )
}

pub fn forbidden(id: &str) -> Value {
    err(
        id,
        "forbidden",
        "not available for your role",
        Some(json!({ "redirect": "/dashboard" })),
    )
}
