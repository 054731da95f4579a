// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("no security descriptor registered for agent {0:?}")]
    NotFound(String),
    #[error("agent {agent_id:?} denied: {reason}")]
    Denied { agent_id: String, reason: String },
}

impl SecurityError {
    pub fn denied(agent_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Denied {
            agent_id: agent_id.into(),
            reason: reason.into(),
        }
    }
}
