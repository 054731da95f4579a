// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found or expired")]
    NotFound(String),
}
