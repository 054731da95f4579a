// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small publisher used by every component with fan-out events
//! (registry, supervisor, backend client, workflow engine).
//!
//! Handlers are invoked synchronously, in subscription order, against a
//! snapshot taken under the lock — never while the lock is held. A handler
//! that panics is caught and swallowed so it cannot stop the remaining
//! handlers or corrupt caller state.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

pub struct EventEmitter<E> {
    handlers: RwLock<Vec<Handler<E>>>,
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&E) + Send + Sync + 'static) {
        self.handlers.write().push(Arc::new(handler));
    }

    /// Invoke every subscriber with `event`, outside any lock the caller may
    /// hold on mutated state. A handler invoked during `emit` does not see
    /// subscriptions added concurrently with this call.
    pub fn emit(&self, event: E) {
        let snapshot: Vec<Handler<E>> = self.handlers.read().clone();
        for handler in snapshot {
            let _ = catch_unwind(AssertUnwindSafe(|| handler(&event)));
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
