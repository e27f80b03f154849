use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Response-envelope normalization for the campus API.
///
/// The API wraps most payloads as `{ success, message, data: { <key>: … } }`
/// but older routes answer with a bare entity, a top-level collection key,
/// or a raw array. Every service funnels responses through these helpers so
/// the precedence lives in exactly one place:
///
///   lists:    data.<key> array  ->  <key> array  ->  raw array  ->  []
///   entities: data.<key>        ->  data         ->  raw payload
///
/// Shape variance alone never fails a list; only element decoding can.

/// Explicit failure check, run before unwrapping mutation responses:
/// `success == false` fails with the server's `error`, else its `message`,
/// else the caller's fallback text.
pub fn ensure_success(payload: &Value, fallback: &str) -> Result<(), ApiError> {
    let Some(obj) = payload.as_object() else {
        return Ok(());
    };
    if obj.get("success").and_then(Value::as_bool) == Some(false) {
        let message = obj
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| obj.get("message").and_then(Value::as_str))
            .unwrap_or(fallback);
        return Err(ApiError::api(message));
    }
    Ok(())
}

pub fn unwrap_list<T: DeserializeOwned>(payload: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut obj) => {
            let nested = match obj.get_mut("data") {
                Some(Value::Object(data)) => match data.remove(key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                },
                _ => None,
            };
            match nested {
                Some(items) => items,
                None => match obj.remove(key) {
                    Some(Value::Array(items)) => items,
                    _ => return Ok(Vec::new()),
                },
            }
        }
        _ => return Ok(Vec::new()),
    };
    serde_json::from_value(Value::Array(items)).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn unwrap_entity<T: DeserializeOwned>(payload: Value, key: &str) -> Result<T, ApiError> {
    serde_json::from_value(entity_slot(payload, key)).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Entities that may legitimately be absent (a student's submission before
/// they submit). Only the named slots count; a missing or null slot is
/// `None`, never an error, and the bare-`data` fallback does not apply.
pub fn unwrap_optional_entity<T: DeserializeOwned>(
    payload: Value,
    key: &str,
) -> Result<Option<T>, ApiError> {
    let slot = match payload {
        Value::Object(mut obj) => {
            let nested = match obj.get_mut("data") {
                Some(Value::Object(data)) => data.remove(key),
                _ => None,
            };
            match nested {
                Some(v) if !v.is_null() => v,
                _ => match obj.remove(key) {
                    Some(v) if !v.is_null() => v,
                    _ => return Ok(None),
                },
            }
        }
        _ => return Ok(None),
    };
    serde_json::from_value(slot)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn entity_slot(payload: Value, key: &str) -> Value {
    match payload {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Object(mut data)) => match data.remove(key) {
                Some(v) if !v.is_null() => v,
                _ => Value::Object(data),
            },
            Some(data) if !data.is_null() => data,
            _ => Value::Object(obj),
        },
        other => other,
    }
}
