// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node definitions and the shared context handlers run against.
//!
//! Handler values are normalized at the boundary to a single asynchronous
//! signature (`BoxFuture`-returning closure). A synchronous handler is
//! accepted through [`WorkflowNodeDefinition::sync`], which wraps it in
//! `async move { ... }` rather than the engine doing reflective dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use agentrt_core::{Clock, RetryPolicy, SessionId};
use agentrt_context::InMemoryContextStore;
use futures_core::future::BoxFuture;
use serde_json::Value;

/// The outcome a node handler returns: `Ok` data on success, a plain
/// string message on failure (surfaced as [`crate::WorkflowError::TaskFailed`]).
pub type NodeOutcome = Result<Value, String>;

pub type NodeFuture = BoxFuture<'static, NodeOutcome>;

/// Shared state handlers run against: a context store, the workflow's
/// optional session id, and caller-supplied metadata.
pub struct WorkflowContext<C: Clock> {
    pub store: Arc<InMemoryContextStore<C>>,
    pub session_id: Option<SessionId>,
    pub metadata: HashMap<String, Value>,
}

impl<C: Clock> Clone for WorkflowContext<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            session_id: self.session_id.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl<C: Clock> WorkflowContext<C> {
    pub fn new(store: Arc<InMemoryContextStore<C>>) -> Self {
        Self {
            store,
            session_id: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

type Handler<C> = Arc<dyn Fn(WorkflowContext<C>) -> NodeFuture + Send + Sync>;
type RollbackHandler<C> = Arc<dyn Fn(WorkflowContext<C>) -> NodeFuture + Send + Sync>;

/// One node in the DAG: an id, its dependencies, the async work it runs,
/// an optional rollback handler, and its retry policy.
pub struct WorkflowNodeDefinition<C: Clock> {
    pub id: String,
    pub depends_on: Vec<String>,
    pub retry: RetryPolicy,
    handler: Handler<C>,
    rollback: Option<RollbackHandler<C>>,
}

impl<C: Clock + 'static> WorkflowNodeDefinition<C> {
    /// Accepts an already-asynchronous handler.
    pub fn new(
        id: impl Into<String>,
        handler: impl Fn(WorkflowContext<C>) -> NodeFuture + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            depends_on: Vec::new(),
            retry: RetryPolicy::default(),
            handler: Arc::new(handler),
            rollback: None,
        }
    }

    /// Accepts a synchronous handler, wrapping it in `async move { ... }`.
    pub fn sync(
        id: impl Into<String>,
        handler: impl Fn(WorkflowContext<C>) -> NodeOutcome + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, move |ctx| {
            let outcome = handler(ctx);
            Box::pin(async move { outcome }) as NodeFuture
        })
    }

    pub fn depends_on(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn rollback(
        mut self,
        handler: impl Fn(WorkflowContext<C>) -> NodeFuture + Send + Sync + 'static,
    ) -> Self {
        self.rollback = Some(Arc::new(handler));
        self
    }

    pub fn rollback_sync(
        self,
        handler: impl Fn(WorkflowContext<C>) -> NodeOutcome + Send + Sync + 'static,
    ) -> Self {
        self.rollback(move |ctx| {
            let outcome = handler(ctx);
            Box::pin(async move { outcome }) as NodeFuture
        })
    }

    pub(crate) fn run(&self, ctx: WorkflowContext<C>) -> impl Future<Output = NodeOutcome> {
        (self.handler)(ctx)
    }

    pub(crate) fn run_rollback(&self, ctx: WorkflowContext<C>) -> Option<Pin<Box<dyn Future<Output = NodeOutcome> + Send>>> {
        self.rollback.as_ref().map(|rollback| rollback(ctx))
    }
}
