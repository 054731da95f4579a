// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter registry and invocation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::adapter::Adapter;
use crate::error::IntegrationError;

#[derive(Default)]
pub struct IntegrationHost {
    adapters: RwLock<HashMap<String, Arc<dyn Adapter>>>,
}

impl IntegrationHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl Into<String>, adapter: Arc<dyn Adapter>) -> Result<(), IntegrationError> {
        let name = name.into();
        let mut adapters = self.adapters.write();
        if adapters.contains_key(&name) {
            return Err(IntegrationError::Conflict(name));
        }
        adapters.insert(name, adapter);
        Ok(())
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.adapters.write().remove(name).is_some()
    }

    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, IntegrationError> {
        let adapter = self
            .adapters
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| IntegrationError::NotFound(name.to_string()))?;
        adapter.invoke(args).await
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
