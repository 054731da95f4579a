// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The adapter trait is a narrow capability interface; adapter bodies beyond
//! the in-tree demo are out of scope.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::IntegrationError;

#[async_trait]
pub trait Adapter: Send + Sync {
    async fn invoke(&self, args: Value) -> Result<Value, IntegrationError>;
}

/// Demo adapter that returns its arguments unchanged, purely to exercise
/// registration and dispatch end to end.
#[derive(Debug, Default)]
pub struct EchoAdapter;

#[async_trait]
impl Adapter for EchoAdapter {
    async fn invoke(&self, args: Value) -> Result<Value, IntegrationError> {
        Ok(args)
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{Adapter, IntegrationError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;

    /// Records every call it receives, for assertions in tests.
    #[derive(Clone, Default)]
    pub struct FakeAdapter {
        calls: Arc<Mutex<Vec<Value>>>,
    }

    impl FakeAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<Value> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl Adapter for FakeAdapter {
        async fn invoke(&self, args: Value) -> Result<Value, IntegrationError> {
            self.calls.lock().push(args.clone());
            Ok(args)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAdapter;
