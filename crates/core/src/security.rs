// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data held by the security guard; enforcement lives in `agentrt-security`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{AgentId, Capability};

/// The capability grant and allow-lists recorded for one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityDescriptor {
    pub agent_id: AgentId,
    pub capabilities: BTreeSet<Capability>,
    pub fs_allow_list: Option<Vec<PathBuf>>,
    pub exec_allow_list: Option<Vec<PathBuf>>,
    pub allow_network_outbound: bool,
    pub allow_network_inbound: bool,
}

impl SecurityDescriptor {
    pub fn new(agent_id: impl Into<AgentId>) -> Self {
        Self {
            agent_id: agent_id.into(),
            capabilities: BTreeSet::new(),
            fs_allow_list: None,
            exec_allow_list: None,
            allow_network_outbound: false,
            allow_network_inbound: false,
        }
    }

    pub fn with_capability(mut self, cap: Capability) -> Self {
        self.capabilities.insert(cap);
        self
    }

    pub fn with_fs_allow_list(mut self, paths: Vec<PathBuf>) -> Self {
        self.fs_allow_list = Some(paths);
        self
    }

    pub fn with_exec_allow_list(mut self, paths: Vec<PathBuf>) -> Self {
        self.exec_allow_list = Some(paths);
        self
    }

    pub fn allowing_network_outbound(mut self) -> Self {
        self.allow_network_outbound = true;
        self
    }

    pub fn allowing_network_inbound(mut self) -> Self {
        self.allow_network_inbound = true;
        self
    }

    pub fn has(&self, cap: Capability) -> bool {
        self.capabilities.contains(&cap)
    }
}

#[cfg(test)]
#[path = "security_tests.rs"]
mod tests;
