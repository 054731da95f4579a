// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assembling a namespace snapshot into the entries an LLM payload would carry.
//!
//! Packaging the entries into an actual backend payload is out of scope here;
//! this stops at the ordered key/value list.

use agentrt_core::Clock;
use serde_json::Value;

use crate::store::InMemoryContextStore;

/// One entry of a packed prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptEntry {
    pub key: String,
    pub value: Value,
}

/// The result of packing a namespace (or a subset of its keys).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptPackage {
    pub entries: Vec<PromptEntry>,
}

/// Which keys to pack: the whole namespace, or only the named keys.
pub enum PackOptions<'a> {
    AllKeys,
    Keys(&'a [&'a str]),
}

/// Pack a namespace snapshot into a [`PromptPackage`].
///
/// `Keys` silently drops requested keys whose value is absent and preserves
/// the caller's requested order; `AllKeys` uses the snapshot's own iteration
/// order.
pub fn pack_prompt<C: Clock>(
    store: &InMemoryContextStore<C>,
    namespace: &str,
    options: PackOptions<'_>,
) -> PromptPackage {
    let snapshot = store.snapshot(namespace);
    let entries = match options {
        PackOptions::AllKeys => snapshot
            .data
            .into_iter()
            .map(|(key, value)| PromptEntry { key, value })
            .collect(),
        PackOptions::Keys(keys) => keys
            .iter()
            .filter_map(|key| {
                snapshot.data.get(*key).map(|value| PromptEntry {
                    key: (*key).to_string(),
                    value: value.clone(),
                })
            })
            .collect(),
    };
    PromptPackage { entries }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
