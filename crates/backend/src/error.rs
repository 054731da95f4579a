// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum BackendError {
    #[error("request timed out")]
    Timeout,
    #[error("backend client is stopped")]
    Stopped,
    #[error("backend channel protocol error: {0}")]
    Protocol(String),
    #[error("backend child process exited")]
    BackendExited,
}
