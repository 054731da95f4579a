// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telemetry sinks are a narrow capability trait; the real sink body is out
//! of scope beyond the in-tree `TracingSink`.

use crate::event::{Level, TelemetryEvent};

pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: &TelemetryEvent);
}

/// Re-emits every event through the process's `tracing` subscriber.
///
/// [`Telemetry::emit`](crate::Telemetry::emit) already emits unconditionally
/// through `tracing` ahead of the registered sink list, so registering this
/// sink too would double-log; it exists as the default, in-tree
/// [`TelemetrySink`] implementation for hosts that want `tracing` output
/// to show up in their own sink list (alongside others, or for symmetry),
/// not as the ambient path itself.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn emit(&self, event: &TelemetryEvent) {
        match event.level {
            Level::Debug => tracing::debug!(name = %event.name, payload = ?event.payload, "telemetry"),
            Level::Info => tracing::info!(name = %event.name, payload = ?event.payload, "telemetry"),
            Level::Warn => tracing::warn!(name = %event.name, payload = ?event.payload, "telemetry"),
            Level::Error => tracing::error!(name = %event.name, payload = ?event.payload, "telemetry"),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{TelemetryEvent, TelemetrySink};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records every event it receives, for assertions in tests.
    #[derive(Clone, Default)]
    pub struct FakeSink {
        events: Arc<Mutex<Vec<TelemetryEvent>>>,
    }

    impl FakeSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events.lock().clone()
        }
    }

    impl TelemetrySink for FakeSink {
        fn emit(&self, event: &TelemetryEvent) {
            self.events.lock().push(event.clone());
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSink;
