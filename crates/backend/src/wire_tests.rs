use agentrt_core::BackendCommand;
use serde_json::json;

use super::*;

#[test]
fn encode_request_injects_id_and_omits_absent_fields() {
    let id = Uuid::nil();
    let command = BackendCommand::new("ping");
    let line = encode_request(id, &command);
    let value: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["id"], json!(id.to_string()));
    assert_eq!(value["op"], json!("ping"));
    assert!(value.get("args").is_none());
    assert!(value.get("timeout_ms").is_none());
}

#[test]
fn encode_request_carries_args_and_timeout() {
    let id = Uuid::nil();
    let command = BackendCommand::new("exec")
        .with_args(json!({"path": "/tmp"}))
        .with_timeout_ms(500);
    let line = encode_request(id, &command);
    let value: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["args"]["path"], json!("/tmp"));
    assert_eq!(value["timeout_ms"], json!(500));
}

#[test]
fn decode_line_without_id_is_a_notification() {
    let line = r#"{"event":"progress","pct":50}"#;
    match decode_line(line).unwrap() {
        IncomingLine::Notification(value) => assert_eq!(value["event"], json!("progress")),
        IncomingLine::Response { .. } => panic!("expected notification"),
    }
}

#[test]
fn decode_line_success_response() {
    let id = Uuid::new_v4();
    let line = format!(r#"{{"id":"{id}","ok":true,"data":{{"x":1}}}}"#);
    match decode_line(&line).unwrap() {
        IncomingLine::Response { id: decoded_id, result } => {
            assert_eq!(decoded_id, id);
            assert!(result.is_ok());
            assert_eq!(result.data(), Some(&json!({"x": 1})));
        }
        IncomingLine::Notification(_) => panic!("expected response"),
    }
}

#[test]
fn decode_line_failure_response() {
    let id = Uuid::new_v4();
    let line = format!(r#"{{"id":"{id}","ok":false,"error":"boom"}}"#);
    match decode_line(&line).unwrap() {
        IncomingLine::Response { result, .. } => assert!(!result.is_ok()),
        IncomingLine::Notification(_) => panic!("expected response"),
    }
}

#[test]
fn decode_line_missing_ok_is_a_protocol_error() {
    let id = Uuid::new_v4();
    let line = format!(r#"{{"id":"{id}"}}"#);
    assert!(decode_line(&line).is_err());
}

#[test]
fn decode_line_malformed_json_is_a_protocol_error() {
    assert!(decode_line("not json").is_err());
}

#[test]
fn decode_line_non_object_is_a_protocol_error() {
    assert!(decode_line("[1,2,3]").is_err());
}
