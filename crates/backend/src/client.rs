// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request/response multiplexer speaking newline-delimited JSON with the
//! backend child over its supervised stdin/stdout.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agentrt_core::{BackendCommand, BackendResult, EventEmitter};
use agentrt_supervisor::{ChildStdio, ProcessSupervisor, SupervisorConfig, SupervisorEvent};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::ChildStdin;
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use uuid::Uuid;

use crate::error::BackendError;
use crate::wire::{decode_line, encode_request, IncomingLine};

/// Events forwarded from the channel itself, distinct from the process
/// lifecycle events a caller can also observe directly on the supervisor.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    Exited { code: Option<i32> },
    Restarted { attempt: u32 },
    Notification(Value),
    ProtocolError(String),
}

type PendingSlot = oneshot::Sender<Result<BackendResult, BackendError>>;

struct Shared {
    pending: Mutex<HashMap<Uuid, PendingSlot>>,
    stdin: AsyncMutex<Option<ChildStdin>>,
    events: EventEmitter<BackendEvent>,
    stopped: AtomicBool,
}

impl Shared {
    fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            stdin: AsyncMutex::new(None),
            events: EventEmitter::new(),
            stopped: AtomicBool::new(false),
        }
    }

    fn fail_all(&self, make_error: impl Fn() -> BackendError) {
        let slots: Vec<PendingSlot> = {
            let mut pending = self.pending.lock();
            pending.drain().map(|(_, slot)| slot).collect()
        };
        for slot in slots {
            let _ = slot.send(Err(make_error()));
        }
    }

    fn attach(self: &Arc<Self>, stdio: ChildStdio) {
        let ChildStdio {
            pid: _,
            stdin,
            stdout,
            stderr,
        } = stdio;

        let stdin_shared = self.clone();
        tokio::spawn(async move {
            *stdin_shared.stdin.lock().await = Some(stdin);
        });
        let stdout_shared = self.clone();
        tokio::spawn(async move { stdout_shared.read_stdout(stdout).await });
        let stderr_shared = self.clone();
        tokio::spawn(async move { stderr_shared.read_stderr(stderr).await });
    }

    async fn read_stdout(self: Arc<Self>, stdout: tokio::process::ChildStdout) {
        let mut lines = BufReader::new(stdout).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => self.handle_line(&line),
                Ok(None) => return,
                Err(e) => {
                    self.protocol_error(e.to_string());
                    return;
                }
            }
        }
    }

    async fn read_stderr(self: Arc<Self>, stderr: tokio::process::ChildStderr) {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if !line.trim().is_empty() {
                self.protocol_error(line);
            }
        }
    }

    fn handle_line(&self, line: &str) {
        match decode_line(line) {
            Ok(IncomingLine::Response { id, result }) => {
                if let Some(slot) = self.pending.lock().remove(&id) {
                    let _ = slot.send(Ok(result));
                }
            }
            Ok(IncomingLine::Notification(value)) => {
                self.events.emit(BackendEvent::Notification(value));
            }
            Err(e) => self.protocol_error(e.to_string()),
        }
    }

    fn protocol_error(&self, message: String) {
        tracing::warn!(error = %message, "backend protocol error");
        self.fail_all(|| BackendError::Protocol(message.clone()));
        self.events.emit(BackendEvent::ProtocolError(message));
    }

    fn handle_supervisor_event(&self, event: &SupervisorEvent) {
        match event {
            SupervisorEvent::Exited { code } => {
                self.fail_all(|| BackendError::BackendExited);
                self.events.emit(BackendEvent::Exited { code: *code });
            }
            SupervisorEvent::Restarted { attempt } => {
                self.events.emit(BackendEvent::Restarted { attempt: *attempt });
            }
            SupervisorEvent::Started { .. } | SupervisorEvent::Failed(_) => {}
        }
    }
}

/// Request/response multiplexer over a supervised backend child.
pub struct BackendClient {
    supervisor: Arc<ProcessSupervisor>,
    shared: Arc<Shared>,
    default_timeout_ms: u64,
}

impl BackendClient {
    pub fn new(config: SupervisorConfig, default_timeout_ms: u64) -> Arc<Self> {
        let supervisor = ProcessSupervisor::new(config);
        let shared = Arc::new(Shared::new());

        let attach_shared = shared.clone();
        supervisor.on_spawn(move |stdio| attach_shared.attach(stdio));

        let event_shared = shared.clone();
        supervisor.on_event(move |event| event_shared.handle_supervisor_event(event));

        Arc::new(Self {
            supervisor,
            shared,
            default_timeout_ms,
        })
    }

    pub fn on_event(&self, handler: impl Fn(&BackendEvent) + Send + Sync + 'static) {
        self.shared.events.subscribe(handler);
    }

    /// Idempotent; delegates to the underlying supervisor.
    pub async fn start(self: &Arc<Self>) -> Result<(), BackendError> {
        self.shared.stopped.store(false, Ordering::SeqCst);
        self.supervisor
            .start()
            .await
            .map_err(|e| BackendError::Protocol(e.to_string()))
    }

    /// Stops the supervisor and fails every in-flight request with
    /// [`BackendError::Stopped`].
    pub async fn stop(self: &Arc<Self>) -> Result<(), BackendError> {
        self.shared.stopped.store(true, Ordering::SeqCst);
        self.shared.fail_all(|| BackendError::Stopped);
        self.supervisor
            .stop(nix::sys::signal::Signal::SIGTERM)
            .await
            .map_err(|e| BackendError::Protocol(e.to_string()))
    }

    /// Sends `command`, waits for its matching response, its per-call or
    /// client-wide default timeout, or the channel failing outright.
    pub async fn exec(&self, command: BackendCommand) -> Result<BackendResult, BackendError> {
        if self.shared.stopped.load(Ordering::SeqCst) {
            return Err(BackendError::Stopped);
        }

        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        self.shared.pending.lock().insert(id, tx);

        let line = encode_request(id, &command);
        if let Err(e) = self.write_line(&line).await {
            self.shared.pending.lock().remove(&id);
            return Err(e);
        }

        let timeout_ms = command.timeout_ms.unwrap_or(self.default_timeout_ms);
        match tokio::time::timeout(Duration::from_millis(timeout_ms), rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(BackendError::Stopped),
            Err(_) => {
                self.shared.pending.lock().remove(&id);
                Err(BackendError::Timeout)
            }
        }
    }

    async fn write_line(&self, line: &str) -> Result<(), BackendError> {
        let mut guard = self.shared.stdin.lock().await;
        let stdin = guard.as_mut().ok_or(BackendError::Stopped)?;
        stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|_| BackendError::BackendExited)?;
        stdin
            .write_all(b"\n")
            .await
            .map_err(|_| BackendError::BackendExited)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
