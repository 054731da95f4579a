// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent registration, runtime-state transitions, and event fan-out.

use std::collections::HashMap;

use agentrt_core::{
    AgentDefinition, AgentId, AgentRegistryEntry, AgentRuntimeState, AgentStatus, Clock,
    EventEmitter,
};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::RegistryError;

/// Fan-out events emitted by [`AgentRegistry`] after each committed mutation.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    Registered(AgentRegistryEntry),
    Unregistered(AgentId),
    StateChanged(AgentRegistryEntry),
}

/// Fields an caller may patch via [`AgentRegistry::update_state`]; absent
/// fields are left untouched, but `updated_at` advances regardless.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub status: Option<AgentStatus>,
    pub error: Option<String>,
    pub resource_usage: Option<Value>,
}

pub struct AgentRegistry<C: Clock> {
    clock: C,
    entries: RwLock<HashMap<AgentId, AgentRegistryEntry>>,
    events: EventEmitter<RegistryEvent>,
}

impl<C: Clock> AgentRegistry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: RwLock::new(HashMap::new()),
            events: EventEmitter::new(),
        }
    }

    pub fn on_event(&self, handler: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.events.subscribe(handler);
    }

    pub fn register(&self, definition: AgentDefinition) -> Result<AgentRegistryEntry, RegistryError> {
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&definition.id) {
            if existing.definition.singleton {
                return Err(RegistryError::Conflict(definition.id.as_str().to_string()));
            }
        }
        let state = entries
            .get(&definition.id)
            .map(|existing| existing.state.clone())
            .unwrap_or_else(|| AgentRuntimeState::offline(self.clock.epoch_ms()));
        let entry = AgentRegistryEntry {
            definition: definition.clone(),
            state,
        };
        entries.insert(definition.id.clone(), entry.clone());
        drop(entries);
        self.events.emit(RegistryEvent::Registered(entry.clone()));
        Ok(entry)
    }

    pub fn unregister(&self, id: &AgentId) -> bool {
        let removed = self.entries.write().remove(id).is_some();
        if removed {
            self.events.emit(RegistryEvent::Unregistered(id.clone()));
        }
        removed
    }

    pub fn set_status(
        &self,
        id: &AgentId,
        status: AgentStatus,
        error: Option<String>,
    ) -> Result<AgentRuntimeState, RegistryError> {
        self.update_state(
            id,
            StatePatch {
                status: Some(status),
                error,
                resource_usage: None,
            },
        )
    }

    pub fn update_resources(
        &self,
        id: &AgentId,
        usage: Value,
    ) -> Result<AgentRuntimeState, RegistryError> {
        self.update_state(
            id,
            StatePatch {
                status: None,
                error: None,
                resource_usage: Some(usage),
            },
        )
    }

    /// Apply `patch`, refreshing `updated_at` even when every field is `None`.
    pub fn update_state(
        &self,
        id: &AgentId,
        patch: StatePatch,
    ) -> Result<AgentRuntimeState, RegistryError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.as_str().to_string()))?;
        if let Some(status) = patch.status {
            entry.state.status = status;
        }
        if patch.error.is_some() {
            entry.state.error = patch.error;
        }
        if patch.resource_usage.is_some() {
            entry.state.resource_usage = patch.resource_usage;
        }
        entry.state.updated_at = self.clock.epoch_ms();
        let committed = entry.clone();
        drop(entries);
        tracing::debug!(
            agent_id = committed.definition.id.as_str(),
            status = %committed.state.status,
            "agent state changed"
        );
        self.events.emit(RegistryEvent::StateChanged(committed.clone()));
        Ok(committed.state)
    }

    pub fn get(&self, id: &AgentId) -> Option<AgentRegistryEntry> {
        self.entries.read().get(id).cloned()
    }

    pub fn has(&self, id: &AgentId) -> bool {
        self.entries.read().contains_key(id)
    }

    pub fn list(&self) -> Vec<AgentRegistryEntry> {
        self.entries.read().values().cloned().collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
