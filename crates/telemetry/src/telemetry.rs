// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured event emission to sinks plus the ambient `tracing` stream.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use agentrt_core::Clock;
use parking_lot::RwLock;
use serde_json::Value;

use crate::event::{Level, TelemetryEvent};
use crate::sink::TelemetrySink;

/// Emits [`TelemetryEvent`]s to every registered sink, in registration
/// order, and always to the process's `tracing` subscriber.
///
/// `child(bindings)` produces a logger sharing the same sink list but with
/// its own bindings merged on top of the parent's.
#[derive(Clone)]
pub struct Telemetry<C: Clock> {
    clock: C,
    sinks: Arc<RwLock<Vec<Arc<dyn TelemetrySink>>>>,
    bindings: BTreeMap<String, Value>,
}

impl<C: Clock> Telemetry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            sinks: Arc::new(RwLock::new(Vec::new())),
            bindings: BTreeMap::new(),
        }
    }

    pub fn register_sink(&self, sink: Arc<dyn TelemetrySink>) {
        self.sinks.write().push(sink);
    }

    pub fn child(&self, bindings: BTreeMap<String, Value>) -> Self {
        let mut merged = self.bindings.clone();
        merged.extend(bindings);
        Self {
            clock: self.clock.clone(),
            sinks: self.sinks.clone(),
            bindings: merged,
        }
    }

    pub fn emit(&self, name: impl Into<String>, level: Level, payload: Option<Value>) {
        let event = TelemetryEvent {
            name: name.into(),
            level,
            timestamp: self.clock.epoch_ms(),
            payload: self.merged_payload(payload),
        };
        emit_to_tracing(&event);
        let snapshot: Vec<Arc<dyn TelemetrySink>> = self.sinks.read().clone();
        for sink in snapshot {
            let _ = catch_unwind(AssertUnwindSafe(|| sink.emit(&event)));
        }
    }

    pub fn debug(&self, name: impl Into<String>, payload: Option<Value>) {
        self.emit(name, Level::Debug, payload)
    }

    pub fn info(&self, name: impl Into<String>, payload: Option<Value>) {
        self.emit(name, Level::Info, payload)
    }

    pub fn warn(&self, name: impl Into<String>, payload: Option<Value>) {
        self.emit(name, Level::Warn, payload)
    }

    pub fn error(&self, name: impl Into<String>, payload: Option<Value>) {
        self.emit(name, Level::Error, payload)
    }

    fn merged_payload(&self, payload: Option<Value>) -> Option<Value> {
        if self.bindings.is_empty() {
            return payload;
        }
        let mut map = serde_json::Map::new();
        for (key, value) in &self.bindings {
            map.insert(key.clone(), value.clone());
        }
        if let Some(Value::Object(explicit)) = payload {
            for (key, value) in explicit {
                map.insert(key, value);
            }
        }
        Some(Value::Object(map))
    }
}

/// Unconditional `tracing` emission, independent of whatever sinks are
/// registered on the [`Telemetry`] instance that produced `event`.
fn emit_to_tracing(event: &TelemetryEvent) {
    match event.level {
        Level::Debug => tracing::debug!(name = %event.name, payload = ?event.payload, "telemetry event"),
        Level::Info => tracing::info!(name = %event.name, payload = ?event.payload, "telemetry event"),
        Level::Warn => tracing::warn!(name = %event.name, payload = ?event.payload, "telemetry event"),
        Level::Error => tracing::error!(name = %event.name, payload = ?event.payload, "telemetry event"),
    }
}

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
