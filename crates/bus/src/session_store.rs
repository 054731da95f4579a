// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TTL-bounded session records with lazy and explicit expiration sweeps.

use std::collections::HashMap;

use agentrt_core::{AgentId, Clock, SessionId, SessionRecord};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::SessionError;

pub struct SessionStore<C: Clock> {
    clock: C,
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl<C: Clock> SessionStore<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self, ttl_ms: Option<u64>, seed_context: HashMap<String, Value>) -> SessionRecord {
        let record = SessionRecord::new(self.clock.epoch_ms(), ttl_ms, seed_context);
        self.sessions.write().insert(record.id, record.clone());
        record
    }

    /// Returns the record unless it is expired, in which case it is
    /// lazily removed and `None` is returned.
    pub fn get(&self, id: SessionId) -> Option<SessionRecord> {
        let now = self.clock.epoch_ms();
        let mut sessions = self.sessions.write();
        match sessions.get(&id) {
            Some(record) if record.is_expired(now) => {
                sessions.remove(&id);
                None
            }
            Some(record) => Some(record.clone()),
            None => None,
        }
    }

    pub fn extend(&self, id: SessionId, ttl_ms: u64) -> Result<SessionRecord, SessionError> {
        self.with_record(id, |record, now| {
            record.ttl_ms = Some(ttl_ms);
            record.expires_at = Some(now + ttl_ms);
        })
    }

    pub fn attach_agent(&self, id: SessionId, agent_id: AgentId) -> Result<SessionRecord, SessionError> {
        self.with_record(id, |record, _| {
            record.agents.insert(agent_id);
        })
    }

    pub fn detach_agent(&self, id: SessionId, agent_id: &AgentId) -> Result<SessionRecord, SessionError> {
        self.with_record(id, |record, _| {
            record.agents.remove(agent_id);
        })
    }

    pub fn set_context(&self, id: SessionId, key: &str, value: Value) -> Result<SessionRecord, SessionError> {
        self.with_record(id, |record, _| {
            record.context.insert(key.to_string(), value);
        })
    }

    pub fn get_context(&self, id: SessionId, key: &str) -> Result<Option<Value>, SessionError> {
        let now = self.clock.epoch_ms();
        let sessions = self.sessions.read();
        let record = sessions
            .get(&id)
            .filter(|record| !record.is_expired(now))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(record.context.get(key).cloned())
    }

    fn with_record(
        &self,
        id: SessionId,
        mutate: impl FnOnce(&mut SessionRecord, u64),
    ) -> Result<SessionRecord, SessionError> {
        let now = self.clock.epoch_ms();
        let mut sessions = self.sessions.write();
        let expired = sessions.get(&id).map(|record| record.is_expired(now)).unwrap_or(false);
        if expired {
            sessions.remove(&id);
        }
        let record = sessions
            .get_mut(&id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        mutate(record, now);
        Ok(record.clone())
    }

    /// Remove every expired entry.
    pub fn sweep(&self) {
        let now = self.clock.epoch_ms();
        self.sessions.write().retain(|_, record| !record.is_expired(now));
    }

    pub fn list(&self) -> Vec<SessionRecord> {
        self.sweep();
        self.sessions.read().values().cloned().collect()
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
