// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::path::PathBuf;

/// In-process configuration for a [`crate::ProcessSupervisor`]. There is no
/// file or environment front-end for these fields beyond the launcher
/// resolution the backend client performs on top of this struct.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
    pub auto_restart: bool,
    pub max_restarts: Option<u32>,
    pub backoff_ms: u64,
}

impl SupervisorConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
            auto_restart: false,
            max_restarts: None,
            backoff_ms: 1000,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    agentrt_core::setters! {
        set { args: Vec<String>, env: HashMap<String, String>, auto_restart: bool, backoff_ms: u64 }
        option { cwd: PathBuf, max_restarts: u32 }
    }
}
