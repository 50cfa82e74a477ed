//! In-memory gateway for tests
//!
//! Responses are scripted per method. A scripted sequence is consumed front
//! to back and its last entry repeats.

use super::{RpcError, RpcGateway, RpcResult};
use crate::metrics::RequestContext;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
    pub correlation_id: Uuid,
}

#[derive(Default)]
pub struct ScriptedGateway {
    scripts: Mutex<HashMap<String, VecDeque<RpcResult<Value>>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: &str, value: Value) -> Self {
        self.set(method, vec![Ok(value)]);
        self
    }

    pub fn respond_sequence(self, method: &str, values: Vec<Value>) -> Self {
        self.set(method, values.into_iter().map(Ok).collect());
        self
    }

    pub fn fail(self, method: &str, error: RpcError) -> Self {
        self.set(method, vec![Err(error)]);
        self
    }

    /// Every call sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the script for a method while the gateway is in use
    pub fn set(&self, method: &str, script: Vec<RpcResult<Value>>) {
        self.scripts
            .lock()
            .insert(method.to_string(), script.into_iter().collect());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.method == method).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_response(&self, method: &str) -> RpcResult<Value> {
        let mut scripts = self.scripts.lock();
        match scripts.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(RpcError::InvalidResponse("empty script".to_string()))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(RpcError::InvalidResponse("empty script".to_string()))),
            None => Err(RpcError::ConnectionFailed(format!(
                "no scripted response for {}",
                method
            ))),
        }
    }
}

#[async_trait]
impl RpcGateway for ScriptedGateway {
    async fn execute_raw(
        &self,
        ctx: &RequestContext,
        method: &str,
        params: Value,
    ) -> RpcResult<Value> {
        self.calls.lock().push(RecordedCall {
            method: method.to_string(),
            params,
            correlation_id: ctx.correlation_id,
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.next_response(method)
    }

    fn endpoint(&self) -> &str {
        "scripted://test"
    }
}
