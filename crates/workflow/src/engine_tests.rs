use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use agentrt_context::InMemoryContextStore;
use agentrt_core::{FakeClock, RetryPolicy};
use parking_lot::Mutex;
use serde_json::json;

use super::*;

fn ctx() -> WorkflowContext<FakeClock> {
    WorkflowContext::new(Arc::new(InMemoryContextStore::new(FakeClock::new())))
}

#[tokio::test]
async fn dependent_node_runs_strictly_after_its_dependency() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let order: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let order_a = order.clone();
    let a = WorkflowNodeDefinition::sync("a", move |_ctx| {
        order_a.lock().push("a".to_string());
        Ok(json!("a"))
    });
    let order_b = order.clone();
    let b = WorkflowNodeDefinition::sync("b", move |_ctx| {
        order_b.lock().push("b".to_string());
        Ok(json!("b"))
    })
    .depends_on(["a"]);

    let summary = engine.run(vec![a, b], ctx(), RunOptions::default()).await.unwrap();
    assert!(!summary.has_failed());
    assert_eq!(summary.completed_order, vec!["a", "b"]);
    assert_eq!(*order.lock(), vec!["a", "b"]);
}

#[tokio::test]
async fn independent_nodes_run_concurrently() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let a = WorkflowNodeDefinition::new("a", |_ctx| {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            Ok(json!("a"))
        }) as NodeFuture
    });
    let b = WorkflowNodeDefinition::new("b", |_ctx| {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            Ok(json!("b"))
        }) as NodeFuture
    });

    let start = std::time::Instant::now();
    let summary = engine
        .run(vec![a, b], ctx(), RunOptions::new(2))
        .await
        .unwrap();
    assert!(!summary.has_failed());
    assert!(start.elapsed() < std::time::Duration::from_millis(100));
}

#[tokio::test]
async fn retries_before_succeeding() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();
    let node = WorkflowNodeDefinition::sync("flaky", move |_ctx| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        if n < 2 {
            Err("not yet".to_string())
        } else {
            Ok(json!("ok"))
        }
    })
    .retry(RetryPolicy::new(3, 0));

    let summary = engine.run(vec![node], ctx(), RunOptions::default()).await.unwrap();
    assert!(!summary.has_failed());
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn failure_triggers_rollback_in_reverse_completion_order() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let rolled_back: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let rb_a = rolled_back.clone();
    let a = WorkflowNodeDefinition::sync("a", |_ctx| Ok(json!("a"))).rollback_sync(move |_ctx| {
        rb_a.lock().push("a".to_string());
        Ok(json!(null))
    });
    let rb_b = rolled_back.clone();
    let b = WorkflowNodeDefinition::sync("b", |_ctx| Ok(json!("b")))
        .depends_on(["a"])
        .rollback_sync(move |_ctx| {
            rb_b.lock().push("b".to_string());
            Ok(json!(null))
        });
    let c = WorkflowNodeDefinition::sync("c", |_ctx| Err("boom".to_string())).depends_on(["b"]);

    let summary = engine.run(vec![a, b, c], ctx(), RunOptions::default()).await.unwrap();
    assert!(summary.has_failed());
    assert_eq!(summary.failed.get("c").map(String::as_str), Some("boom"));
    assert_eq!(*rolled_back.lock(), vec!["b".to_string(), "a".to_string()]);
}

#[tokio::test]
async fn sticky_failure_blocks_new_dispatch() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let ran = Arc::new(AtomicU32::new(0));

    let a = WorkflowNodeDefinition::sync("a", |_ctx| Err("boom".to_string()));
    let counter = ran.clone();
    let b = WorkflowNodeDefinition::sync("b", move |_ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(json!("b"))
    })
    .depends_on(["a"]);

    let summary = engine.run(vec![a, b], ctx(), RunOptions::default()).await.unwrap();
    assert!(summary.has_failed());
    assert_eq!(ran.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejects_unknown_dependency() {
    let engine = WorkflowEngine::new(FakeClock::new());
    let node = WorkflowNodeDefinition::sync("a", |_ctx| Ok(json!("a"))).depends_on(["ghost"]);
    let result = engine.run(vec![node], ctx(), RunOptions::default()).await;
    assert!(matches!(result, Err(WorkflowError::UnknownDependency(_, _))));
}
