// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::adapter::{EchoAdapter, FakeAdapter};
use serde_json::json;

#[tokio::test]
async fn invoke_dispatches_to_the_registered_adapter() {
    let host = IntegrationHost::new();
    host.register("echo", Arc::new(EchoAdapter)).unwrap();
    let result = host.invoke("echo", json!({"a": 1})).await.unwrap();
    assert_eq!(result, json!({"a": 1}));
}

#[tokio::test]
async fn invoke_on_unknown_name_is_not_found() {
    let host = IntegrationHost::new();
    let err = host.invoke("missing", json!(null)).await.unwrap_err();
    assert!(matches!(err, IntegrationError::NotFound(_)));
}

#[test]
fn registering_a_duplicate_name_is_a_conflict() {
    let host = IntegrationHost::new();
    host.register("echo", Arc::new(EchoAdapter)).unwrap();
    let err = host.register("echo", Arc::new(EchoAdapter)).unwrap_err();
    assert!(matches!(err, IntegrationError::Conflict(_)));
}

#[test]
fn unregister_is_idempotent() {
    let host = IntegrationHost::new();
    host.register("echo", Arc::new(EchoAdapter)).unwrap();
    assert!(host.unregister("echo"));
    assert!(!host.unregister("echo"));
}

#[tokio::test]
async fn fake_adapter_records_every_call() {
    let host = IntegrationHost::new();
    let fake = FakeAdapter::new();
    host.register("fake", Arc::new(fake.clone())).unwrap();
    host.invoke("fake", json!(1)).await.unwrap();
    host.invoke("fake", json!(2)).await.unwrap();
    assert_eq!(fake.calls(), vec![json!(1), json!(2)]);
}
