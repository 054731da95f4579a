// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn builder_methods_set_optional_fields() {
    let cmd = BackendCommand::new("echo")
        .with_args(serde_json::json!({"text": "hi"}))
        .with_timeout_ms(500);
    assert_eq!(cmd.op, "echo");
    assert_eq!(cmd.timeout_ms, Some(500));
    assert!(cmd.args.is_some());
}

#[test]
fn ok_result_exposes_data() {
    let result = BackendResult::Ok {
        data: Some(Value::Bool(true)),
    };
    assert!(result.is_ok());
    assert_eq!(result.data(), Some(&Value::Bool(true)));
}

#[test]
fn err_result_has_no_data() {
    let result = BackendResult::Err {
        error: "boom".to_string(),
    };
    assert!(!result.is_ok());
    assert_eq!(result.data(), None);
}
