// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SupervisorError {
    #[error("failed to spawn child process: {0}")]
    SpawnFailed(String),
    #[error("child process exceeded its restart budget")]
    MaxRestartsExceeded,
}
