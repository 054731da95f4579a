// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent identity, definition, and runtime state.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Capability;

/// Unique identifier for a registered agent, chosen by the caller (not generated).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for AgentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Runtime lifecycle status of a registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Running,
    Error,
    Stopped,
    Offline,
}

crate::simple_display! {
    AgentStatus {
        Idle => "idle",
        Running => "running",
        Error => "error",
        Stopped => "stopped",
        Offline => "offline",
    }
}

/// Immutable descriptor supplied by the caller at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub id: AgentId,
    pub name: String,
    pub capabilities: BTreeSet<Capability>,
    pub metadata: Option<Value>,
    pub singleton: bool,
    pub max_instances: Option<u32>,
    pub resource_limits: Option<Value>,
}

impl AgentDefinition {
    pub fn builder(id: impl Into<AgentId>, name: impl Into<String>) -> AgentDefinitionBuilder {
        AgentDefinitionBuilder::new(id, name)
    }
}

/// Builder for [`AgentDefinition`]; the only constructor shape this type offers.
pub struct AgentDefinitionBuilder {
    id: AgentId,
    name: String,
    capabilities: BTreeSet<Capability>,
    metadata: Option<Value>,
    singleton: bool,
    max_instances: Option<u32>,
    resource_limits: Option<Value>,
}

impl AgentDefinitionBuilder {
    pub fn new(id: impl Into<AgentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capabilities: BTreeSet::new(),
            metadata: None,
            singleton: false,
            max_instances: None,
            resource_limits: None,
        }
    }

    pub fn capability(mut self, cap: Capability) -> Self {
        self.capabilities.insert(cap);
        self
    }

    crate::setters! {
        set { capabilities: BTreeSet<Capability>, singleton: bool }
        option { max_instances: u32, resource_limits: Value, metadata: Value }
    }

    pub fn build(self) -> AgentDefinition {
        AgentDefinition {
            id: self.id,
            name: self.name,
            capabilities: self.capabilities,
            metadata: self.metadata,
            singleton: self.singleton,
            max_instances: self.max_instances,
            resource_limits: self.resource_limits,
        }
    }
}

/// Mutable runtime state tracked alongside a definition.
///
/// `updated_at` only ever moves forward for a given agent; see the
/// registry's `update_state` contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRuntimeState {
    pub status: AgentStatus,
    pub updated_at: u64,
    pub error: Option<String>,
    pub resource_usage: Option<Value>,
}

impl AgentRuntimeState {
    pub fn offline(updated_at: u64) -> Self {
        Self {
            status: AgentStatus::Offline,
            updated_at,
            error: None,
            resource_usage: None,
        }
    }
}

/// A definition paired with its current runtime state, owned by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRegistryEntry {
    pub definition: AgentDefinition,
    pub state: AgentRuntimeState,
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
