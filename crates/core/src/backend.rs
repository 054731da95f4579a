// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared request/response shapes for the backend client's wire protocol.
//!
//! Framing (newline-delimited JSON, id injection) lives in `agentrt-backend`;
//! these are the plain value types a caller builds and receives.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command a caller asks the backend client to run.
///
/// The client injects a fresh `id` when serializing this onto the wire;
/// this type itself carries no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCommand {
    pub op: String,
    pub args: Option<Value>,
    pub timeout_ms: Option<u64>,
}

impl BackendCommand {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            args: None,
            timeout_ms: None,
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// The outcome of a completed command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendResult {
    Ok { data: Option<Value> },
    Err { error: String },
}

impl BackendResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, BackendResult::Ok { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            BackendResult::Ok { data } => data.as_ref(),
            BackendResult::Err { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
