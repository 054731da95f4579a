// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves the interpreter and entry file used to launch the backend
//! child, mirroring the upstream Python client's
//! `_resolve_launch_options`/`_try_resolve_cli` order. Resolution happens
//! once, at client construction, into an owned [`LaunchOptions`] rather
//! than being re-derived on every spawn.

use std::path::Path;

const DEFAULT_NODE_MODULES_ENTRY: &str = "node_modules/@openai/codex/bin/codex.js";
const FALLBACK_ENTRY: &str = "ref/codex-src/codex-cli/bin/codex.js";

/// Caller-supplied overrides considered before any environment fallback.
#[derive(Debug, Clone, Default)]
pub struct LauncherOverrides {
    pub command_path: Option<String>,
    pub node_path: Option<String>,
    pub cli_path: Option<String>,
}

/// The resolved, ready-to-spawn interpreter and entry file.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub interpreter: String,
    pub entry: String,
}

impl LaunchOptions {
    pub fn into_argv(self) -> (String, Vec<String>) {
        (self.interpreter, vec![self.entry])
    }
}

/// Resolves launch options against the process environment and current
/// working directory.
pub fn resolve(overrides: &LauncherOverrides) -> LaunchOptions {
    resolve_with(overrides, &std::env::current_dir().unwrap_or_default(), |key| {
        std::env::var(key).ok()
    })
}

/// Testable variant taking an explicit working directory and env lookup.
pub fn resolve_with(
    overrides: &LauncherOverrides,
    cwd: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> LaunchOptions {
    let interpreter = overrides
        .command_path
        .clone()
        .or_else(|| overrides.node_path.clone())
        .or_else(|| env("NODE_PATH"))
        .unwrap_or_else(|| "node".to_string());

    let entry = overrides
        .cli_path
        .clone()
        .or_else(|| env("CODEX_CLI_PATH"))
        .or_else(|| {
            let candidate = cwd.join(DEFAULT_NODE_MODULES_ENTRY);
            candidate.exists().then(|| candidate.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| FALLBACK_ENTRY.to_string());

    LaunchOptions { interpreter, entry }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
