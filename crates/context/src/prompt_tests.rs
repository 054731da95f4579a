// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::InMemoryContextStore;
use agentrt_core::FakeClock;
use serde_json::json;

#[test]
fn packing_requested_keys_preserves_request_order_and_drops_missing() {
    let store = InMemoryContextStore::new(FakeClock::new());
    store.set("session", "question", json!("hello"));
    store.set("session", "answer", json!("world"));

    let package = pack_prompt(&store, "session", PackOptions::Keys(&["question"]));

    assert_eq!(
        package.entries,
        vec![PromptEntry {
            key: "question".to_string(),
            value: json!("hello"),
        }]
    );
}

#[test]
fn packing_an_absent_key_drops_it_silently() {
    let store = InMemoryContextStore::new(FakeClock::new());
    store.set("session", "question", json!("hello"));

    let package = pack_prompt(&store, "session", PackOptions::Keys(&["question", "missing"]));

    assert_eq!(package.entries.len(), 1);
}

#[test]
fn packing_all_keys_includes_every_entry() {
    let store = InMemoryContextStore::new(FakeClock::new());
    store.set("session", "a", json!(1));
    store.set("session", "b", json!(2));

    let package = pack_prompt(&store, "session", PackOptions::AllKeys);

    assert_eq!(package.entries.len(), 2);
}
