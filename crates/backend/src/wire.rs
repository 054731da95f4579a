// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newline-delimited JSON framing for the backend wire protocol.

use agentrt_core::{BackendCommand, BackendResult};
use serde_json::{json, Value};
use uuid::Uuid;

/// Serializes `command` with an injected `id` into one JSON line (no
/// trailing newline; the caller appends it when writing to the child).
pub fn encode_request(id: Uuid, command: &BackendCommand) -> String {
    let mut object = json!({
        "id": id.to_string(),
        "op": command.op,
    });
    if let Some(args) = &command.args {
        object["args"] = args.clone();
    }
    if let Some(timeout_ms) = command.timeout_ms {
        object["timeout_ms"] = json!(timeout_ms);
    }
    object.to_string()
}

/// A parsed stdout line: either a response keyed by id, or a notification.
pub enum IncomingLine {
    Response { id: Uuid, result: BackendResult },
    Notification(Value),
}

#[derive(Debug, thiserror::Error, Clone)]
#[error("malformed backend line: {0}")]
pub struct DecodeError(pub String);

pub fn decode_line(line: &str) -> Result<IncomingLine, DecodeError> {
    let value: Value = serde_json::from_str(line).map_err(|e| DecodeError(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError("line is not a JSON object".to_string()))?;

    let Some(id_value) = object.get("id") else {
        return Ok(IncomingLine::Notification(value));
    };

    let id_str = id_value
        .as_str()
        .ok_or_else(|| DecodeError("id field is not a string".to_string()))?;
    let id = Uuid::parse_str(id_str).map_err(|e| DecodeError(e.to_string()))?;

    let ok = object
        .get("ok")
        .and_then(Value::as_bool)
        .ok_or_else(|| DecodeError("missing boolean ok field".to_string()))?;

    let result = if ok {
        BackendResult::Ok {
            data: object.get("data").cloned(),
        }
    } else {
        let error = object
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        BackendResult::Err { error }
    };

    Ok(IncomingLine::Response { id, result })
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
