// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topic and direct-address pub/sub.
//!
//! Topic and agent-id subscriptions live in separate maps so a topic named
//! the same as an agent id can never cross-purge on `unsubscribe`.

use std::collections::HashMap;
use std::sync::Arc;

use agentrt_core::{Clock, MessageEnvelope, SessionId};
use parking_lot::RwLock;
use serde_json::Value;

pub type Handler = Arc<dyn Fn(&MessageEnvelope) + Send + Sync>;

/// Which namespace a subscription key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusChannel {
    Topic,
    Agent,
}

#[derive(Default)]
struct Subscribers(Vec<Handler>);

impl Subscribers {
    fn add(&mut self, handler: Handler) {
        if !self.0.iter().any(|existing| Arc::ptr_eq(existing, &handler)) {
            self.0.push(handler);
        }
    }

    fn remove(&mut self, handler: &Handler) {
        self.0.retain(|existing| !Arc::ptr_eq(existing, handler));
    }
}

pub struct MessageBus<C: Clock> {
    clock: C,
    topics: RwLock<HashMap<String, Subscribers>>,
    agents: RwLock<HashMap<String, Subscribers>>,
}

impl<C: Clock> MessageBus<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            topics: RwLock::new(HashMap::new()),
            agents: RwLock::new(HashMap::new()),
        }
    }

    fn table(&self, channel: BusChannel) -> &RwLock<HashMap<String, Subscribers>> {
        match channel {
            BusChannel::Topic => &self.topics,
            BusChannel::Agent => &self.agents,
        }
    }

    pub fn subscribe(&self, topic: &str, handler: Handler) {
        self.table(BusChannel::Topic)
            .write()
            .entry(topic.to_string())
            .or_default()
            .add(handler);
    }

    pub fn subscribe_agent(&self, agent_id: &str, handler: Handler) {
        self.table(BusChannel::Agent)
            .write()
            .entry(agent_id.to_string())
            .or_default()
            .add(handler);
    }

    /// Remove `handler` from `key` in the given channel's namespace. A no-op
    /// if the key or the handler is not present. Keys with no remaining
    /// subscribers are dropped from the map.
    pub fn unsubscribe(&self, channel: BusChannel, key: &str, handler: &Handler) {
        let mut table = self.table(channel).write();
        let Some(subscribers) = table.get_mut(key) else {
            return;
        };
        subscribers.remove(handler);
        if subscribers.0.is_empty() {
            table.remove(key);
        }
    }

    pub fn publish(
        &self,
        topic: &str,
        payload: Value,
        session_id: Option<SessionId>,
    ) -> MessageEnvelope {
        let mut envelope = MessageEnvelope::broadcast(topic, payload, self.clock.epoch_ms());
        if let Some(session_id) = session_id {
            envelope = envelope.with_session(session_id);
        }
        self.dispatch(BusChannel::Topic, topic, &envelope);
        envelope
    }

    pub fn send_to_agent(
        &self,
        agent_id: &str,
        payload: Value,
        session_id: Option<SessionId>,
    ) -> MessageEnvelope {
        let mut envelope = MessageEnvelope::direct(agent_id, payload, self.clock.epoch_ms());
        if let Some(session_id) = session_id {
            envelope = envelope.with_session(session_id);
        }
        self.dispatch(BusChannel::Agent, agent_id, &envelope);
        envelope
    }

    fn dispatch(&self, channel: BusChannel, key: &str, envelope: &MessageEnvelope) {
        let snapshot: Vec<Handler> = self
            .table(channel)
            .read()
            .get(key)
            .map(|subscribers| subscribers.0.clone())
            .unwrap_or_default();
        for handler in snapshot {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(envelope)));
        }
    }
}

#[cfg(test)]
#[path = "message_bus_tests.rs"]
mod tests;
