// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("no adapter registered under {0:?}")]
    NotFound(String),
    #[error("an adapter is already registered under {0:?}")]
    Conflict(String),
    #[error("adapter {name:?} failed: {message}")]
    AdapterFailed { name: String, message: String },
}
