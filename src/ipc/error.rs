use crate::error::HostError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(id: &str, code: &str, message: impl Into<String>) -> serde_json::Value {
    json!({
        "id": id,
        "ok": false,
        "error": { "code": code, "message": message.into() },
    })
}

pub fn host_err(id: &str, e: &HostError) -> serde_json::Value {
    err(id, e.code(), e.to_string())
}

/// Serializes a result payload, falling back to an error envelope.
pub fn ok_serialized<T: serde::Serialize>(id: &str, value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(v) => ok(id, v),
        Err(e) => err(id, "serialize_failed", e.to_string()),
    }
}
