// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! agentrt-supervisor: spawns and supervises the backend child process.

pub mod config;
pub mod error;
pub mod supervisor;

pub use config::SupervisorConfig;
pub use error::SupervisorError;
pub use supervisor::{ChildStdio, ProcessSupervisor, SupervisorEvent, SupervisorState};
