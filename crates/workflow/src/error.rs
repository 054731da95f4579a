// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum WorkflowError {
    #[error("node {0} depends on unknown node {1}")]
    UnknownDependency(String, String),
    #[error("node id {0} is defined more than once")]
    DuplicateNode(String),
    #[error("node {id} failed: {message}")]
    TaskFailed { id: String, message: String },
}
