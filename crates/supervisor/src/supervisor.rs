// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child lifecycle and restart policy.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use agentrt_core::EventEmitter;
use parking_lot::RwLock;
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use tokio::sync::Mutex;

use crate::config::SupervisorConfig;
use crate::error::SupervisorError;

/// Lifecycle state. Either terminates at `Stopped` via `stop()`, or cycles
/// `Running -> Crashed -> Restarting -> Running` while `auto_restart` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    NotStarted,
    Running,
    Stopping,
    Stopped,
    Crashed,
    Restarting,
}

/// The child's stdio pipes, handed to whoever registered `on_spawn` at the
/// moment each spawn (initial or restart) succeeds.
pub struct ChildStdio {
    pub pid: u32,
    pub stdin: ChildStdin,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// Fan-out events; observers may not assume any particular thread/task.
#[derive(Debug, Clone)]
pub enum SupervisorEvent {
    Started { pid: u32 },
    Exited { code: Option<i32> },
    Failed(String),
    Restarted { attempt: u32 },
}

struct Inner {
    state: SupervisorState,
    child: Option<Child>,
    shutting_down: bool,
    attempt: u32,
}

/// Launches and supervises one external child process.
///
/// Must be held behind an `Arc` to call `start`/`stop`: the restart watcher
/// needs to outlive the call that spawned it.
pub struct ProcessSupervisor {
    config: SupervisorConfig,
    events: EventEmitter<SupervisorEvent>,
    on_spawn: RwLock<Option<Arc<dyn Fn(ChildStdio) + Send + Sync>>>,
    inner: Mutex<Inner>,
}

impl ProcessSupervisor {
    pub fn new(config: SupervisorConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            events: EventEmitter::new(),
            on_spawn: RwLock::new(None),
            inner: Mutex::new(Inner {
                state: SupervisorState::NotStarted,
                child: None,
                shutting_down: false,
                attempt: 0,
            }),
        })
    }

    pub fn on_event(&self, handler: impl Fn(&SupervisorEvent) + Send + Sync + 'static) {
        self.events.subscribe(handler);
    }

    /// Register the sole consumer of each spawn's stdio pipes. Replaces any
    /// previous registration.
    pub fn on_spawn(&self, handler: impl Fn(ChildStdio) + Send + Sync + 'static) {
        *self.on_spawn.write() = Some(Arc::new(handler));
    }

    pub async fn state(&self) -> SupervisorState {
        self.inner.lock().await.state
    }

    /// Idempotent: a no-op if already running.
    pub async fn start(self: &Arc<Self>) -> Result<(), SupervisorError> {
        {
            let inner = self.inner.lock().await;
            if inner.state == SupervisorState::Running {
                return Ok(());
            }
        }
        let mut inner = self.inner.lock().await;
        inner.shutting_down = false;
        let result = self.spawn_locked(&mut inner).await;
        drop(inner);
        if result.is_ok() {
            self.clone().spawn_watcher();
        }
        result
    }

    /// Sends `signal` to the child and marks the supervisor as shutting
    /// down. Idempotent on an already-stopped supervisor.
    pub async fn stop(self: &Arc<Self>, signal: nix::sys::signal::Signal) -> Result<(), SupervisorError> {
        let mut inner = self.inner.lock().await;
        inner.shutting_down = true;
        inner.state = SupervisorState::Stopping;
        match inner.child.as_ref().and_then(|child| child.id()) {
            Some(pid) => {
                let _ = nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), signal);
            }
            None => inner.state = SupervisorState::Stopped,
        }
        Ok(())
    }

    async fn spawn_locked(&self, inner: &mut Inner) -> Result<(), SupervisorError> {
        let mut command = tokio::process::Command::new(&self.config.command);
        command
            .args(&self.config.args)
            .envs(self.config.env.clone())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.config.cwd {
            command.current_dir(cwd);
        }

        match command.spawn() {
            Ok(mut child) => {
                let stdio = take_stdio(&mut child)?;
                inner.child = Some(child);
                inner.state = SupervisorState::Running;
                tracing::info!(pid = stdio.pid, command = %self.config.command, "child started");
                if let Some(on_spawn) = self.on_spawn.read().clone() {
                    on_spawn(ChildStdio {
                        pid: stdio.pid,
                        stdin: stdio.stdin,
                        stdout: stdio.stdout,
                        stderr: stdio.stderr,
                    });
                }
                self.events.emit(SupervisorEvent::Started { pid: stdio.pid });
                Ok(())
            }
            Err(e) => {
                let error = SupervisorError::SpawnFailed(e.to_string());
                tracing::warn!(error = %error, "spawn failed");
                self.events.emit(SupervisorEvent::Failed(error.to_string()));
                if self.config.auto_restart {
                    Box::pin(self.schedule_restart(inner)).await;
                }
                Err(error)
            }
        }
    }

    fn spawn_watcher(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                let mut child = {
                    let mut inner = self.inner.lock().await;
                    match inner.child.take() {
                        Some(child) => child,
                        None => return,
                    }
                };
                let status = child.wait().await;
                let mut inner = self.inner.lock().await;
                let shutting_down = inner.shutting_down;
                inner.state = if shutting_down {
                    SupervisorState::Stopped
                } else {
                    SupervisorState::Crashed
                };
                let code = status.ok().and_then(|status| status.code());
                self.events.emit(SupervisorEvent::Exited { code });
                if shutting_down || !self.config.auto_restart {
                    return;
                }
                self.schedule_restart(&mut inner).await;
                if inner.state != SupervisorState::Running {
                    return;
                }
            }
        });
    }

    async fn schedule_restart(&self, inner: &mut Inner) {
        if let Some(max) = self.config.max_restarts {
            if inner.attempt >= max {
                inner.state = SupervisorState::Stopped;
                self.events
                    .emit(SupervisorEvent::Failed(SupervisorError::MaxRestartsExceeded.to_string()));
                return;
            }
        }
        inner.attempt += 1;
        let attempt = inner.attempt;
        inner.state = SupervisorState::Restarting;
        tokio::time::sleep(Duration::from_millis(self.config.backoff_ms)).await;
        self.events.emit(SupervisorEvent::Restarted { attempt });
        let _ = Box::pin(self.spawn_locked(inner)).await;
    }
}

fn take_stdio(child: &mut Child) -> Result<ChildStdio, SupervisorError> {
    let pid = child
        .id()
        .ok_or_else(|| SupervisorError::SpawnFailed("child exited before pid was observable".into()))?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| SupervisorError::SpawnFailed("missing stdin pipe".into()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| SupervisorError::SpawnFailed("missing stdout pipe".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| SupervisorError::SpawnFailed("missing stderr pipe".into()))?;
    Ok(ChildStdio {
        pid,
        stdin,
        stdout,
        stderr,
    })
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
