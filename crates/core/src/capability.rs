// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative permission tags enforced by the security guard.

use serde::{Deserialize, Serialize};

/// A capability an agent may be granted.
///
/// The set is closed: no caller can invent a new tag, so the security
/// guard never needs an "unknown capability" branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    ReadFs,
    WriteFs,
    Exec,
    NetOutbound,
    NetInbound,
}

crate::simple_display! {
    Capability {
        ReadFs => "readFs",
        WriteFs => "writeFs",
        Exec => "exec",
        NetOutbound => "netOutbound",
        NetInbound => "netInbound",
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
