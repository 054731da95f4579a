// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Namespaced key/value state with point-in-time, deep-copied snapshots.

use std::collections::HashMap;

use agentrt_core::Clock;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

/// A frozen copy of one namespace's contents, independent of later mutations.
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    pub id: Uuid,
    pub namespace: String,
    pub timestamp: u64,
    pub data: HashMap<String, Value>,
}

/// Namespaced key/value store shared by workflow nodes and prompt packing.
///
/// All state lives under one lock; mutations are short enough that no
/// caller ever holds it across an await point.
pub struct InMemoryContextStore<C: Clock> {
    clock: C,
    namespaces: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl<C: Clock> InMemoryContextStore<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            namespaces: RwLock::new(HashMap::new()),
        }
    }

    pub fn set(&self, namespace: &str, key: &str, value: Value) {
        self.namespaces
            .write()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.namespaces.read().get(namespace)?.get(key).cloned()
    }

    pub fn delete(&self, namespace: &str, key: &str) -> bool {
        match self.namespaces.write().get_mut(namespace) {
            Some(ns) => ns.remove(key).is_some(),
            None => false,
        }
    }

    /// A fresh, independent copy of `namespace`'s current contents.
    ///
    /// A namespace that has never been written to yields an empty snapshot
    /// rather than an error.
    pub fn snapshot(&self, namespace: &str) -> ContextSnapshot {
        let data = self
            .namespaces
            .read()
            .get(namespace)
            .cloned()
            .unwrap_or_default();
        ContextSnapshot {
            id: Uuid::new_v4(),
            namespace: namespace.to_string(),
            timestamp: self.clock.epoch_ms(),
            data,
        }
    }

    pub fn list_namespaces(&self) -> Vec<String> {
        self.namespaces.read().keys().cloned().collect()
    }

    pub fn clear(&self) {
        self.namespaces.write().clear();
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
