// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability and path/binary allow-list enforcement.
//!
//! This guard advises; it does not jail. Enforcement beyond path/binary
//! allow-lists is out of scope.

use std::collections::HashMap;
use std::path::Path;

use agentrt_core::{AgentId, Capability, SecurityDescriptor};
use parking_lot::RwLock;

use crate::error::SecurityError;
use crate::path_match;

/// Holds one [`SecurityDescriptor`] per agent and enforces it on demand.
pub struct SecurityGuard {
    descriptors: RwLock<HashMap<AgentId, SecurityDescriptor>>,
}

impl Default for SecurityGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityGuard {
    pub fn new() -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, descriptor: SecurityDescriptor) {
        self.descriptors
            .write()
            .insert(descriptor.agent_id.clone(), descriptor);
    }

    pub fn unregister(&self, agent_id: &AgentId) -> bool {
        self.descriptors.write().remove(agent_id).is_some()
    }

    fn with_descriptor<T>(
        &self,
        agent_id: &AgentId,
        f: impl FnOnce(&SecurityDescriptor) -> Result<T, SecurityError>,
    ) -> Result<T, SecurityError> {
        let descriptors = self.descriptors.read();
        let descriptor = descriptors
            .get(agent_id)
            .ok_or_else(|| SecurityError::NotFound(agent_id.as_str().to_string()))?;
        f(descriptor)
    }

    pub fn assert_capability(&self, agent_id: &AgentId, cap: Capability) -> Result<(), SecurityError> {
        self.with_descriptor(agent_id, |descriptor| {
            if descriptor.has(cap) {
                Ok(())
            } else {
                Err(SecurityError::denied(
                    agent_id.as_str(),
                    format!("missing capability {cap}"),
                ))
            }
        })
    }

    pub fn assert_fs_access(&self, agent_id: &AgentId, path: &Path) -> Result<(), SecurityError> {
        self.with_descriptor(agent_id, |descriptor| {
            if !descriptor.has(Capability::ReadFs) {
                return Err(SecurityError::denied(agent_id.as_str(), "missing capability readFs"));
            }
            let Some(allow_list) = descriptor.fs_allow_list.as_ref().filter(|l| !l.is_empty()) else {
                return Ok(());
            };
            let Some(target) = path_match::canonicalize(path) else {
                return Err(SecurityError::denied(agent_id.as_str(), "path does not exist"));
            };
            let allowed = allow_list.iter().any(|entry| {
                path_match::canonicalize(entry)
                    .map(|entry| path_match::is_ancestor_or_equal(&entry, &target))
                    .unwrap_or(false)
            });
            if allowed {
                Ok(())
            } else {
                Err(SecurityError::denied(agent_id.as_str(), "path not in allow-list"))
            }
        })
    }

    pub fn assert_exec(&self, agent_id: &AgentId, binary: &Path) -> Result<(), SecurityError> {
        self.with_descriptor(agent_id, |descriptor| {
            if !descriptor.has(Capability::Exec) {
                return Err(SecurityError::denied(agent_id.as_str(), "missing capability exec"));
            }
            let Some(allow_list) = descriptor.exec_allow_list.as_ref().filter(|l| !l.is_empty()) else {
                return Ok(());
            };
            let Some(target) = path_match::canonicalize(binary) else {
                return Err(SecurityError::denied(agent_id.as_str(), "binary does not exist"));
            };
            let allowed = allow_list.iter().any(|entry| {
                path_match::canonicalize(entry)
                    .map(|entry| path_match::is_equal(&entry, &target))
                    .unwrap_or(false)
            });
            if allowed {
                Ok(())
            } else {
                Err(SecurityError::denied(agent_id.as_str(), "binary not in allow-list"))
            }
        })
    }

    pub fn assert_network_outbound(&self, agent_id: &AgentId) -> Result<(), SecurityError> {
        self.with_descriptor(agent_id, |descriptor| {
            if !descriptor.has(Capability::NetOutbound) {
                return Err(SecurityError::denied(agent_id.as_str(), "missing capability netOutbound"));
            }
            if descriptor.allow_network_outbound {
                Ok(())
            } else {
                Err(SecurityError::denied(agent_id.as_str(), "outbound network not allowed"))
            }
        })
    }

    pub fn assert_network_inbound(&self, agent_id: &AgentId) -> Result<(), SecurityError> {
        self.with_descriptor(agent_id, |descriptor| {
            if !descriptor.has(Capability::NetInbound) {
                return Err(SecurityError::denied(agent_id.as_str(), "missing capability netInbound"));
            }
            if descriptor.allow_network_inbound {
                Ok(())
            } else {
                Err(SecurityError::denied(agent_id.as_str(), "inbound network not allowed"))
            }
        })
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
