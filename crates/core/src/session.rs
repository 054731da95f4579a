// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identity and the record a session store owns.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::AgentId;

/// Unique identifier for a session, always server-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A TTL-bounded container for contextual key/value state shared across agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub created_at: u64,
    pub expires_at: Option<u64>,
    pub ttl_ms: Option<u64>,
    pub context: HashMap<String, Value>,
    pub agents: BTreeSet<AgentId>,
}

impl SessionRecord {
    pub fn new(created_at: u64, ttl_ms: Option<u64>, seed_context: HashMap<String, Value>) -> Self {
        Self {
            id: SessionId::new(),
            created_at,
            expires_at: ttl_ms.map(|ttl| created_at + ttl),
            ttl_ms,
            context: seed_context,
            agents: BTreeSet::new(),
        }
    }

    /// True once `now_ms` has reached or passed `expires_at`, if any is set.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        matches!(self.expires_at, Some(expires_at) if now_ms >= expires_at)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
