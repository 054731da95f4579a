// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared workflow data: retry policy and the run summary.
//!
//! Node definitions and execution live in `agentrt-workflow`; these types
//! are the serializable parts callers inspect after a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Retry configuration for a single node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 1,
            delay_ms: 0,
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay_ms: u64) -> Self {
        Self {
            attempts: attempts.max(1),
            delay_ms,
        }
    }
}

/// The outcome of running a DAG of nodes to completion or first failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRunSummary {
    pub completed: std::collections::BTreeSet<String>,
    pub completed_order: Vec<String>,
    pub failed: BTreeMap<String, String>,
    pub started_at: u64,
    pub finished_at: Option<u64>,
}

impl WorkflowRunSummary {
    pub fn started(at: u64) -> Self {
        Self {
            started_at: at,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self, node_id: &str) {
        self.completed.insert(node_id.to_string());
        self.completed_order.push(node_id.to_string());
    }

    pub fn record_failure(&mut self, node_id: &str, error: impl Into<String>) {
        self.failed.insert(node_id.to_string(), error.into());
    }

    pub fn has_failed(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
