// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The immutable envelope delivered by the message bus.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::SessionId;

/// Whether an envelope was fanned out by topic or addressed to one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Broadcast,
    Direct,
}

crate::simple_display! {
    MessageKind {
        Broadcast => "broadcast",
        Direct => "direct",
    }
}

/// An immutable message with routing metadata delivered by the bus.
///
/// `topic` is either a topic name (`Broadcast`) or an agent id (`Direct`);
/// the two namespaces are otherwise unrelated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub id: Uuid,
    pub session_id: Option<SessionId>,
    pub kind: MessageKind,
    pub topic: String,
    pub payload: Value,
    pub timestamp: u64,
    pub headers: Option<HashMap<String, String>>,
}

impl MessageEnvelope {
    pub fn broadcast(topic: impl Into<String>, payload: Value, timestamp: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: None,
            kind: MessageKind::Broadcast,
            topic: topic.into(),
            payload,
            timestamp,
            headers: None,
        }
    }

    pub fn direct(agent_id: impl Into<String>, payload: Value, timestamp: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: None,
            kind: MessageKind::Direct,
            topic: agent_id.into(),
            payload,
            timestamp,
            headers: None,
        }
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
