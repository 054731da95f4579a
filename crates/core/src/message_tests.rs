// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn broadcast_stamps_the_broadcast_kind() {
    let env = MessageEnvelope::broadcast("topic.a", Value::Null, 10);
    assert_eq!(env.kind, MessageKind::Broadcast);
    assert_eq!(env.topic, "topic.a");
}

#[test]
fn direct_stamps_the_direct_kind_with_the_agent_id_as_topic() {
    let env = MessageEnvelope::direct("assistant", Value::Null, 10);
    assert_eq!(env.kind, MessageKind::Direct);
    assert_eq!(env.topic, "assistant");
}

#[test]
fn each_envelope_gets_a_fresh_id() {
    let a = MessageEnvelope::broadcast("t", Value::Null, 0);
    let b = MessageEnvelope::broadcast("t", Value::Null, 0);
    assert_ne!(a.id, b.id);
}

#[test]
fn with_session_attaches_the_session_id() {
    let sid = SessionId::new();
    let env = MessageEnvelope::broadcast("t", Value::Null, 0).with_session(sid);
    assert_eq!(env.session_id, Some(sid));
}
