// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DAG scheduling with bounded concurrency, per-node retry, and
//! reverse-completion-order rollback on failure.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use agentrt_core::{Clock, EventEmitter, WorkflowRunSummary};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;

use crate::error::WorkflowError;
use crate::node::{NodeFuture, WorkflowContext, WorkflowNodeDefinition};

/// Concurrency and bookkeeping options for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub concurrency: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

impl RunOptions {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

/// Fan-out events for observers; independent of the [`WorkflowRunSummary`]
/// a run ultimately returns.
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    TaskComplete { id: String },
    TaskFailed { id: String, error: String },
    Finished,
}

struct RunState {
    remaining: HashSet<String>,
    in_flight: HashSet<String>,
    ready_queue: Vec<String>,
    summary: WorkflowRunSummary,
}

type NodeMap<C> = HashMap<String, Arc<WorkflowNodeDefinition<C>>>;

/// Executes a bag of [`WorkflowNodeDefinition`]s under a shared
/// [`WorkflowContext`]. Held behind an `Arc` so worker tasks can share it.
pub struct WorkflowEngine<C: Clock> {
    clock: C,
    events: EventEmitter<WorkflowEvent>,
    on_task_complete: Mutex<Option<Arc<dyn Fn(&str, &Value) + Send + Sync>>>,
    on_task_error: Mutex<Option<Arc<dyn Fn(&str, &str) + Send + Sync>>>,
}

impl<C: Clock + 'static> WorkflowEngine<C> {
    pub fn new(clock: C) -> Arc<Self> {
        Arc::new(Self {
            clock,
            events: EventEmitter::new(),
            on_task_complete: Mutex::new(None),
            on_task_error: Mutex::new(None),
        })
    }

    pub fn on_event(&self, handler: impl Fn(&WorkflowEvent) + Send + Sync + 'static) {
        self.events.subscribe(handler);
    }

    pub fn on_task_complete(&self, handler: impl Fn(&str, &Value) + Send + Sync + 'static) {
        *self.on_task_complete.lock() = Some(Arc::new(handler));
    }

    pub fn on_task_error(&self, handler: impl Fn(&str, &str) + Send + Sync + 'static) {
        *self.on_task_error.lock() = Some(Arc::new(handler));
    }

    fn validate(nodes: &[WorkflowNodeDefinition<C>]) -> Result<(), WorkflowError> {
        let mut seen = HashSet::new();
        for node in nodes {
            if !seen.insert(node.id.clone()) {
                return Err(WorkflowError::DuplicateNode(node.id.clone()));
            }
        }
        for node in nodes {
            for dep in &node.depends_on {
                if !seen.contains(dep) {
                    return Err(WorkflowError::UnknownDependency(node.id.clone(), dep.clone()));
                }
            }
        }
        Ok(())
    }

    pub async fn run(
        self: &Arc<Self>,
        nodes: Vec<WorkflowNodeDefinition<C>>,
        ctx: WorkflowContext<C>,
        options: RunOptions,
    ) -> Result<WorkflowRunSummary, WorkflowError> {
        Self::validate(&nodes)?;

        let nodes: Arc<NodeMap<C>> = Arc::new(
            nodes
                .into_iter()
                .map(|node| (node.id.clone(), Arc::new(node)))
                .collect(),
        );

        let ready_queue: Vec<String> = nodes
            .values()
            .filter(|node| node.depends_on.is_empty())
            .map(|node| node.id.clone())
            .collect();

        let state = Arc::new(Mutex::new(RunState {
            remaining: nodes.keys().cloned().collect(),
            in_flight: HashSet::new(),
            ready_queue,
            summary: WorkflowRunSummary::started(self.clock.epoch_ms()),
        }));
        let notify = Arc::new(Notify::new());

        let worker_count = options.concurrency.max(1);
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let engine = self.clone();
            let nodes = nodes.clone();
            let ctx = ctx.clone();
            let state = state.clone();
            let notify = notify.clone();
            handles.push(tokio::spawn(async move {
                engine.worker(nodes, ctx, state, notify).await;
            }));
        }
        for handle in handles {
            let _ = handle.await;
        }

        let mut state = state.lock();
        state.summary.finished_at = Some(self.clock.epoch_ms());
        self.events.emit(WorkflowEvent::Finished);
        Ok(state.summary.clone())
    }

    async fn worker(
        self: Arc<Self>,
        nodes: Arc<NodeMap<C>>,
        ctx: WorkflowContext<C>,
        state: Arc<Mutex<RunState>>,
        notify: Arc<Notify>,
    ) {
        loop {
            let next = {
                let mut state = state.lock();
                if state.summary.has_failed() {
                    None
                } else if let Some(id) = state.ready_queue.pop() {
                    state.in_flight.insert(id.clone());
                    Some(id)
                } else {
                    None
                }
            };

            let Some(id) = next else {
                let done = {
                    let state = state.lock();
                    state.summary.has_failed() || (state.remaining.is_empty() && state.in_flight.is_empty())
                };
                if done {
                    return;
                }
                tokio::select! {
                    _ = notify.notified() => {}
                    _ = tokio::time::sleep(Duration::from_millis(5)) => {}
                }
                continue;
            };

            let Some(node) = nodes.get(&id).cloned() else {
                continue;
            };
            let outcome = self.execute_node(&node, ctx.clone()).await;

            match outcome {
                Ok(value) => {
                    let newly_ready = {
                        let mut state = state.lock();
                        state.in_flight.remove(&id);
                        state.remaining.remove(&id);
                        state.summary.record_success(&id);
                        nodes
                            .values()
                            .filter(|n| state.remaining.contains(&n.id))
                            .filter(|n| !state.in_flight.contains(&n.id))
                            .filter(|n| !state.ready_queue.contains(&n.id))
                            .filter(|n| n.depends_on.iter().all(|dep| state.summary.completed.contains(dep)))
                            .map(|n| n.id.clone())
                            .collect::<Vec<_>>()
                    };
                    {
                        let mut state = state.lock();
                        state.ready_queue.extend(newly_ready);
                    }
                    if let Some(handler) = self.on_task_complete.lock().clone() {
                        handler(&id, &value);
                    }
                    self.events.emit(WorkflowEvent::TaskComplete { id: id.clone() });
                }
                Err(message) => {
                    {
                        let mut state = state.lock();
                        state.in_flight.remove(&id);
                        state.remaining.remove(&id);
                        state.summary.record_failure(&id, message.clone());
                    }
                    if let Some(handler) = self.on_task_error.lock().clone() {
                        handler(&id, &message);
                    }
                    self.events.emit(WorkflowEvent::TaskFailed {
                        id: id.clone(),
                        error: message,
                    });
                    self.rollback(&nodes, &ctx, &state).await;
                }
            }
            notify.notify_waiters();
        }
    }

    async fn execute_node(&self, node: &WorkflowNodeDefinition<C>, ctx: WorkflowContext<C>) -> Result<Value, String> {
        let attempts = node.retry.attempts.max(1);
        let mut last_error = String::new();
        for attempt in 0..attempts {
            match node.run(ctx.clone()).await {
                Ok(value) => return Ok(value),
                Err(message) => {
                    last_error = message;
                    if attempt + 1 < attempts {
                        tokio::time::sleep(Duration::from_millis(node.retry.delay_ms)).await;
                    }
                }
            }
        }
        Err(last_error)
    }

    async fn rollback(&self, nodes: &NodeMap<C>, ctx: &WorkflowContext<C>, state: &Mutex<RunState>) {
        let completed_order: Vec<String> = state.lock().summary.completed_order.clone();
        for id in completed_order.into_iter().rev() {
            let Some(node) = nodes.get(&id) else { continue };
            if let Some(future) = node.run_rollback(ctx.clone()) {
                if let Err(error) = future.await {
                    tracing::warn!(node = %id, error = %error, "rollback handler failed");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
