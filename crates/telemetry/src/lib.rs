// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

//! agentrt-telemetry: structured event emission to sinks and `tracing`.

pub mod event;
pub mod sink;
pub mod telemetry;

pub use event::{Level, TelemetryEvent};
pub use sink::{TelemetrySink, TracingSink};
#[cfg(any(test, feature = "test-support"))]
pub use sink::FakeSink;
pub use telemetry::Telemetry;
