// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! agentrt-integration: adapter registry and invocation.

pub mod adapter;
pub mod error;
pub mod host;

pub use adapter::{Adapter, EchoAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use adapter::FakeAdapter;
pub use error::IntegrationError;
pub use host::IntegrationHost;
