// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("agent {0:?} is not registered")]
    NotFound(String),
    #[error("agent {0:?} is already registered as a singleton")]
    Conflict(String),
}
