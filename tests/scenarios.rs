//! End-to-end scenarios exercising multiple crates together, one per
//! concrete example this workspace's design was checked against.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agentrt_context::{pack_prompt, InMemoryContextStore, PackOptions};
use agentrt_core::{AgentDefinition, AgentId, AgentStatus, Capability, FakeClock, RetryPolicy, SecurityDescriptor, SessionId};
use agentrt_registry::AgentRegistry;
use agentrt_security::SecurityGuard;
use agentrt_workflow::{RunOptions, WorkflowContext, WorkflowEngine, WorkflowNodeDefinition};
use parking_lot::Mutex;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn registry_event_end_to_end() {
    let registry = AgentRegistry::new(FakeClock::new());
    let received = Arc::new(Mutex::new(Vec::new()));
    let recorder = received.clone();
    registry.on_event(move |event| recorder.lock().push(format!("{event:?}")));

    let id = AgentId::new("assistant");
    registry
        .register(
            AgentDefinition::builder(id.clone(), "assistant")
                .capability(Capability::ReadFs)
                .build(),
        )
        .unwrap();
    registry.set_status(&id, AgentStatus::Running, None).unwrap();

    assert_eq!(registry.get(&id).unwrap().state.status, AgentStatus::Running);
    assert!(received.lock().iter().any(|e| e.contains("Registered")));
}

#[test]
fn prompt_pack_keys() {
    let store = InMemoryContextStore::new(FakeClock::new());
    store.set("session", "question", json!("hello"));
    store.set("session", "answer", json!("world"));

    let package = pack_prompt(&store, "session", PackOptions::Keys(&["question"]));
    assert_eq!(package.entries.len(), 1);
    assert_eq!(package.entries[0].key, "question");
    assert_eq!(package.entries[0].value, json!("hello"));
}

#[test]
fn snapshot_is_isolated_from_later_mutations() {
    let store = InMemoryContextStore::new(FakeClock::new());
    store.set("session", "foo", json!(1));
    let snap = store.snapshot("session");
    store.set("session", "foo", json!(2));
    assert_eq!(snap.data.get("foo"), Some(&json!(1)));
}

#[test]
fn fs_allow_list_scopes_access_to_the_temp_dir() {
    let dir = tempdir().unwrap();
    let guard = SecurityGuard::new();
    guard.register(
        SecurityDescriptor::new("agent")
            .with_capability(Capability::ReadFs)
            .with_fs_allow_list(vec![dir.path().to_path_buf()]),
    );

    let allowed = dir.path().join("file.txt");
    std::fs::write(&allowed, b"hi").unwrap();
    let agent = AgentId::new("agent");
    assert!(guard.assert_fs_access(&agent, &allowed).is_ok());
    assert!(guard
        .assert_fs_access(&agent, std::path::Path::new("/etc/passwd"))
        .is_err());
}

#[tokio::test]
async fn workflow_order_with_concurrency_two() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let log_a = log.clone();
    let a = WorkflowNodeDefinition::sync("a", move |_ctx| {
        log_a.lock().push("a".to_string());
        Ok(json!("a"))
    });
    let log_b = log.clone();
    let b = WorkflowNodeDefinition::sync("b", move |_ctx| {
        log_b.lock().push("b".to_string());
        Ok(json!("b"))
    })
    .depends_on(["a"]);

    let ctx = WorkflowContext::new(Arc::new(InMemoryContextStore::new(FakeClock::new())))
        .with_session(SessionId::new());
    let summary = engine.run(vec![a, b], ctx, RunOptions::new(2)).await.unwrap();

    assert!(!summary.has_failed());
    assert_eq!(summary.completed.len(), 2);
    assert_eq!(*log.lock(), vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn workflow_rollback_on_single_node_failure() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let rolled_back = Arc::new(AtomicBool::new(false));
    let marker = rolled_back.clone();

    let node = WorkflowNodeDefinition::sync("task", |_ctx| Err("boom".to_string()))
        .retry(RetryPolicy::new(1, 0))
        .rollback_sync(move |_ctx| {
            marker.store(true, Ordering::SeqCst);
            Ok(json!(null))
        });

    let ctx = WorkflowContext::new(Arc::new(InMemoryContextStore::new(FakeClock::new())));
    let summary = engine.run(vec![node], ctx, RunOptions::default()).await.unwrap();

    assert_eq!(summary.failed.get("task").map(String::as_str), Some("boom"));
    assert!(
        !rolled_back.load(Ordering::SeqCst),
        "the failing node never completed, so its own rollback never runs"
    );
}

#[tokio::test]
async fn backend_round_trip_matches_request_id() {
    use agentrt_backend::BackendClient;
    use agentrt_core::BackendCommand;
    use agentrt_supervisor::SupervisorConfig;

    let config = SupervisorConfig::new("/bin/sh").arg("-c").arg(
        r#"while IFS= read -r line; do
  id=$(printf '%s' "$line" | sed -n 's/.*"id":"\([^"]*\)".*/\1/p')
  printf '{"id":"%s","ok":true,"data":{"pong":true}}\n' "$id"
done"#,
    );
    let client = BackendClient::new(config, 2000);
    client.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let result = client.exec(BackendCommand::new("ping")).await.unwrap();
    assert!(result.is_ok());
    assert_eq!(result.data().unwrap()["pong"], json!(true));

    client.stop().await.unwrap();
}
